use bookshop::clients::OrderBuilder;
use bookshop::model::{BookId, CartLine, Order, OrderId, Recipient};
use bookshop::orders::CheckoutError;
use bookshop::session::Session;
use bookshop::store::mock::{create_mock_collection, expect_create, MockCollection};
use bookshop::store::StoreError;

fn line(book_id: &str, title: &str, price: u64, quantity: u32) -> CartLine {
    CartLine {
        book_id: BookId::from(book_id),
        book_title: title.to_string(),
        author: "Author".to_string(),
        category: "Fiction".to_string(),
        cover_image_url: format!("https://covers.example/{book_id}.jpg"),
        description: String::new(),
        price_at_added: price,
        quantity,
    }
}

fn recipient() -> Recipient {
    Recipient::new("Alice Kim", "12 Main St, Springfield", "0123456789")
}

/// Real checkout builder against a mocked orders collection.
/// This tests the partial-failure bookkeeping in isolation: the mock approves
/// two creates, refuses the third, and the report must say exactly which
/// lines landed, which one failed, and which were never attempted.
#[tokio::test]
async fn test_checkout_stops_at_the_failing_line() {
    let mut orders_mock = MockCollection::<Order>::new();

    // One expectation per cart line the builder should reach. The fourth
    // line must never produce a request, so it gets no expectation.
    orders_mock.expect_create().return_ok(OrderId::from("order_1"));
    orders_mock.expect_create().return_ok(OrderId::from("order_2"));
    orders_mock
        .expect_create()
        .return_err(StoreError::Unavailable("connection reset".to_string()));

    let builder = OrderBuilder::new(orders_mock.client());
    let session = Session::new("user_1");
    let lines = vec![
        line("book_1", "First", 10000, 1),
        line("book_2", "Second", 5000, 2),
        line("book_3", "Third", 7000, 1),
        line("book_4", "Fourth", 3000, 1),
    ];

    let result = builder
        .checkout_cart_lines(&session, &lines, &recipient())
        .await;

    let partial = match result {
        Err(CheckoutError::Partial(partial)) => partial,
        other => panic!("Expected a partial checkout, got {:?}", other),
    };
    assert_eq!(
        partial.created,
        vec![OrderId::from("order_1"), OrderId::from("order_2")]
    );
    assert_eq!(partial.failed_index, 2);
    assert_eq!(partial.failed_book_id, BookId::from("book_3"));
    assert_eq!(
        partial.source,
        StoreError::Unavailable("connection reset".to_string())
    );
    assert_eq!(partial.unattempted, vec![BookId::from("book_4")]);

    orders_mock.verify();
}

/// When the very first line fails there is nothing partial to report: the
/// caller sees the store error directly and can simply retry the checkout.
#[tokio::test]
async fn test_first_line_failure_is_a_plain_store_error() {
    let mut orders_mock = MockCollection::<Order>::new();
    orders_mock
        .expect_create()
        .return_err(StoreError::Unavailable("connection reset".to_string()));

    let builder = OrderBuilder::new(orders_mock.client());
    let session = Session::new("user_1");
    let lines = vec![line("book_1", "First", 10000, 1), line("book_2", "Second", 5000, 1)];

    let result = builder
        .checkout_cart_lines(&session, &lines, &recipient())
        .await;

    assert_eq!(
        result.unwrap_err(),
        CheckoutError::Store(StoreError::Unavailable("connection reset".to_string()))
    );

    orders_mock.verify();
}

/// Inspects the raw create requests a checkout sends: every order of one
/// attempt carries the same checkout id, snapshots its line, and prices at
/// the captured price. A second attempt gets a fresh id.
#[tokio::test]
async fn test_orders_share_the_attempt_checkout_id() {
    let (client, mut requests) = create_mock_collection::<Order>(8);
    let builder = OrderBuilder::new(client);
    let session = Session::new("user_1");
    let lines = vec![
        line("book_1", "First", 10000, 2),
        line("book_2", "Second", 5000, 1),
    ];

    let checkout = {
        let builder = builder.clone();
        let session = session.clone();
        let lines = lines.clone();
        tokio::spawn(async move {
            builder
                .checkout_cart_lines(&session, &lines, &recipient())
                .await
        })
    };

    let (first_params, respond) = expect_create(&mut requests)
        .await
        .expect("No create request for the first line");
    respond
        .send(Ok(OrderId::from("order_1")))
        .expect("Builder hung up");
    let (second_params, respond) = expect_create(&mut requests)
        .await
        .expect("No create request for the second line");
    respond
        .send(Ok(OrderId::from("order_2")))
        .expect("Builder hung up");

    let receipt = checkout
        .await
        .expect("Checkout task panicked")
        .expect("Checkout failed");
    assert_eq!(
        receipt.order_ids,
        vec![OrderId::from("order_1"), OrderId::from("order_2")]
    );

    // Both orders belong to the same attempt
    assert_eq!(first_params.checkout_id, second_params.checkout_id);
    assert_eq!(first_params.checkout_id, receipt.checkout_id);

    // Each order snapshots its cart line
    assert_eq!(first_params.user_id, session.user_id);
    assert_eq!(first_params.book_id, BookId::from("book_1"));
    assert_eq!(first_params.book_title, "First");
    assert_eq!(first_params.quantity, 2);
    assert_eq!(first_params.total_price, 20000, "2 x 10000 at the captured price");
    assert_eq!(second_params.book_id, BookId::from("book_2"));
    assert_eq!(second_params.total_price, 5000);
    assert_eq!(second_params.recipient, recipient());

    // A retry is a new attempt with its own id
    let retry = {
        let builder = builder.clone();
        let session = session.clone();
        let lines = lines.clone();
        tokio::spawn(async move {
            builder
                .checkout_cart_lines(&session, &lines, &recipient())
                .await
        })
    };
    for id in ["order_3", "order_4"] {
        let (_, respond) = expect_create(&mut requests)
            .await
            .expect("No create request on retry");
        respond.send(Ok(OrderId::from(id))).expect("Builder hung up");
    }
    let second_receipt = retry
        .await
        .expect("Retry task panicked")
        .expect("Retry failed");
    assert_ne!(second_receipt.checkout_id, receipt.checkout_id);
}

/// Recipient validation runs before the first write: a refused checkout
/// must not put a single request on the wire.
#[tokio::test]
async fn test_invalid_recipients_send_no_traffic() {
    let (client, mut requests) = create_mock_collection::<Order>(8);
    let builder = OrderBuilder::new(client);
    let session = Session::new("user_1");
    let lines = vec![line("book_1", "First", 10000, 1)];

    let no_phone = Recipient::new("Alice Kim", "12 Main St, Springfield", "  ");
    let result = builder
        .checkout_cart_lines(&session, &lines, &no_phone)
        .await;
    assert!(matches!(result, Err(CheckoutError::InvalidRecipient(_))));

    // Dropping the only client closes the channel; a clean close proves
    // nothing was sent before the validation bounced the request.
    drop(builder);
    assert!(requests.recv().await.is_none());
}
