//! Pure projections over a fetched order set.
//!
//! Everything here works on orders already in hand; nothing touches the
//! store. An order-history view fetches once, then filters and sorts locally.

use crate::model::{Order, OrderStatus};
use std::str::FromStr;
use thiserror::Error;

/// Which statuses an order-history view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every order, Unknown codes included.
    All,
    /// Only orders on exactly this status.
    Only(OrderStatus),
}

/// Raised when a wire string is not a status filter.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Not a status filter: '{0}' (expected \"all\" or a code 0-3)")]
pub struct StatusFilterParseError(pub String);

impl FromStr for StatusFilter {
    type Err = StatusFilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "0" => Ok(Self::Only(OrderStatus::Pending)),
            "1" => Ok(Self::Only(OrderStatus::Confirmed)),
            "2" => Ok(Self::Only(OrderStatus::Shipping)),
            "3" => Ok(Self::Only(OrderStatus::Delivered)),
            other => Err(StatusFilterParseError(other.to_string())),
        }
    }
}

/// Keeps the orders the filter admits.
///
/// `All` passes everything; a concrete status matches exact codes only, so
/// orders on an Unknown code never show up under a concrete filter.
pub fn filter_by_status(orders: &[Order], filter: StatusFilter) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| match filter {
            StatusFilter::All => true,
            StatusFilter::Only(status) => order.status == status,
        })
        .cloned()
        .collect()
}

/// Price sort. Stable: equal-priced orders keep their relative order.
pub fn sort_by_price(orders: &[Order], ascending: bool) -> Vec<Order> {
    let mut sorted = orders.to_vec();
    sorted.sort_by(|a, b| {
        if ascending {
            a.total_price.cmp(&b.total_price)
        } else {
            b.total_price.cmp(&a.total_price)
        }
    });
    sorted
}

/// Recency sort. Stable: orders stamped in the same instant keep their
/// relative order.
pub fn sort_by_date(orders: &[Order], newest_first: bool) -> Vec<Order> {
    let mut sorted = orders.to_vec();
    sorted.sort_by(|a, b| {
        if newest_first {
            b.order_date.cmp(&a.order_date)
        } else {
            a.order_date.cmp(&b.order_date)
        }
    });
    sorted
}

/// Case-insensitive substring match on the book title. A blank term keeps
/// everything.
pub fn filter_by_search_term(orders: &[Order], term: &str) -> Vec<Order> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return orders.to_vec();
    }
    orders
        .iter()
        .filter(|order| order.book_title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BookId, CheckoutId, OrderId, Recipient};
    use crate::session::UserId;
    use chrono::{TimeZone, Utc};

    fn order(id: &str, title: &str, total_price: u64, status: OrderStatus) -> Order {
        Order {
            id: OrderId::from(id),
            user_id: UserId::from("user_1"),
            book_id: BookId::from("book_1"),
            book_title: title.to_string(),
            book_image_url: "https://covers.example/1.jpg".to_string(),
            quantity: 1,
            total_price,
            recipient: Recipient::new("Kim", "12 Main St", "0123456789"),
            order_date: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            status,
            checkout_id: CheckoutId::new(),
        }
    }

    #[test]
    fn concrete_filters_exclude_unknown_codes() {
        let orders = vec![
            order("order_1", "A", 100, OrderStatus::Pending),
            order("order_2", "B", 200, OrderStatus::Delivered),
            order("order_3", "C", 300, OrderStatus::Unknown(7)),
        ];

        let pending = filter_by_status(&orders, StatusFilter::Only(OrderStatus::Pending));
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, OrderId::from("order_1"));

        let all = filter_by_status(&orders, StatusFilter::All);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn status_filters_parse_from_wire_strings() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "0".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(OrderStatus::Pending)
        );
        assert_eq!(
            "3".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(OrderStatus::Delivered)
        );
        assert!("4".parse::<StatusFilter>().is_err());
        assert!("delivered".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn price_sort_is_stable_for_equal_prices() {
        let orders = vec![
            order("order_1", "A", 200, OrderStatus::Pending),
            order("order_2", "B", 100, OrderStatus::Pending),
            order("order_3", "C", 200, OrderStatus::Pending),
        ];

        let ascending = sort_by_price(&orders, true);
        let ids: Vec<_> = ascending.iter().map(|o| o.id.0.as_str()).collect();
        assert_eq!(ids, ["order_2", "order_1", "order_3"]);

        let descending = sort_by_price(&orders, false);
        let ids: Vec<_> = descending.iter().map(|o| o.id.0.as_str()).collect();
        assert_eq!(ids, ["order_1", "order_3", "order_2"]);
    }

    #[test]
    fn date_sort_orders_by_recency() {
        let mut old = order("order_1", "A", 100, OrderStatus::Pending);
        old.order_date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut new = order("order_2", "B", 100, OrderStatus::Pending);
        new.order_date = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let newest_first = sort_by_date(&[old.clone(), new.clone()], true);
        assert_eq!(newest_first[0].id, OrderId::from("order_2"));

        let oldest_first = sort_by_date(&[new, old], false);
        assert_eq!(oldest_first[0].id, OrderId::from("order_1"));
    }

    #[test]
    fn title_search_is_case_insensitive() {
        let orders = vec![
            order("order_1", "The Rust Programming Language", 100, OrderStatus::Pending),
            order("order_2", "Clean Architecture", 200, OrderStatus::Pending),
        ];

        let hits = filter_by_search_term(&orders, "rUsT");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, OrderId::from("order_1"));

        assert_eq!(filter_by_search_term(&orders, "   ").len(), 2);
        assert_eq!(filter_by_search_term(&orders, "").len(), 2);
    }
}
