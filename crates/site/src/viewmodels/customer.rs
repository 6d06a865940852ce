//! Customer page view model.

use crate::db::customers::{Customer, Order};

/// Path prefix for order detail links.
const ORDER_URL_PREFIX: &str = "/orders/";

/// Join the non-blank segments with `separator`.
///
/// `None` and blank-after-trim segments are dropped before joining, so a
/// missing `address2` never produces a stray separator.
#[must_use]
pub fn smart_join<'a, I>(segments: I, separator: &str) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    segments
        .into_iter()
        .flatten()
        .filter(|segment| !segment.trim().is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// One order, projected for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderView {
    pub order_number: String,
    pub date: String,
    pub status: String,
    pub url: String,
}

/// A finite, restartable, lazily projected sequence of orders.
///
/// Holds the source rows; each call to [`iter`](Self::iter) restarts the
/// projection. Output order matches the input order.
#[derive(Debug, Clone, Default)]
pub struct OrderList {
    orders: Vec<Order>,
}

impl OrderList {
    /// Number of orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether there are no orders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Project the orders lazily, in input order.
    pub fn iter(&self) -> impl Iterator<Item = OrderView> + '_ {
        self.orders.iter().map(|order| OrderView {
            order_number: order.order_number.clone(),
            date: order.date.format("%B %e, %Y").to_string(),
            status: order.status.clone(),
            url: format!("{ORDER_URL_PREFIX}{}", order.order_number),
        })
    }
}

/// Flat, display-ready projection of a customer and their orders.
#[derive(Debug, Clone)]
pub struct CustomerViewModel {
    pub first_name: String,
    pub last_name: String,
    /// First and last name smart-joined with a space.
    pub name: String,
    pub email: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    /// Address lines smart-joined with `<br>`.
    pub full_address: String,
    pub phone: String,
    pub orders: OrderList,
}

impl CustomerViewModel {
    /// Build the view model. Pure and synchronous; no I/O.
    #[must_use]
    pub fn build(customer: &Customer, orders: Vec<Order>) -> Self {
        let name = smart_join(
            [
                Some(customer.first_name.as_str()),
                Some(customer.last_name.as_str()),
            ],
            " ",
        );

        // The city/state/zip line is itself smart-joined so a blank city
        // cannot leave a leading comma behind.
        let city = customer.city.as_deref().unwrap_or("");
        let state = customer.state.as_deref().unwrap_or("");
        let zip = customer.zip.as_deref().unwrap_or("");
        let state_zip = smart_join([Some(state), Some(zip)], " ");
        let locality = smart_join([Some(city), Some(state_zip.as_str())], ", ");
        let locality = (!locality.is_empty()).then_some(locality);

        let full_address = smart_join(
            [
                customer.address1.as_deref(),
                customer.address2.as_deref(),
                locality.as_deref(),
            ],
            "<br>",
        );

        Self {
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            name,
            email: customer.email.to_string(),
            address1: customer.address1.clone().unwrap_or_default(),
            address2: customer.address2.clone().unwrap_or_default(),
            city: city.to_owned(),
            state: state.to_owned(),
            zip: zip.to_owned(),
            full_address,
            phone: customer.phone.clone().unwrap_or_default(),
            orders: OrderList { orders },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use meadowlark_core::{CustomerId, Email, OrderId};

    fn customer() -> Customer {
        Customer {
            id: CustomerId::new(1),
            first_name: "Mary".to_owned(),
            last_name: "Sullivan".to_owned(),
            email: Email::parse("mary@example.com").unwrap(),
            address1: Some("123 Main".to_owned()),
            address2: Some("".to_owned()),
            city: Some("Portland".to_owned()),
            state: Some("OR".to_owned()),
            zip: Some("97201".to_owned()),
            phone: None,
        }
    }

    fn order(number: &str) -> Order {
        Order {
            id: OrderId::new(1),
            customer_id: CustomerId::new(1),
            order_number: number.to_owned(),
            date: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            status: "shipped".to_owned(),
        }
    }

    #[test]
    fn test_smart_join_drops_blank_segments() {
        assert_eq!(
            smart_join([Some("a"), None, Some("  "), Some("b")], " "),
            "a b"
        );
        assert_eq!(smart_join::<[Option<&str>; 0]>([], " "), "");
    }

    #[test]
    fn test_full_address_skips_blank_address2() {
        let vm = CustomerViewModel::build(&customer(), Vec::new());
        assert_eq!(vm.full_address, "123 Main<br>Portland, OR 97201");
    }

    #[test]
    fn test_locality_without_city_has_no_leading_comma() {
        let mut missing_city = customer();
        missing_city.city = None;

        let vm = CustomerViewModel::build(&missing_city, Vec::new());
        assert_eq!(vm.full_address, "123 Main<br>OR 97201");
    }

    #[test]
    fn test_locality_with_city_only() {
        let mut city_only = customer();
        city_only.state = None;
        city_only.zip = Some("  ".to_owned());

        let vm = CustomerViewModel::build(&city_only, Vec::new());
        assert_eq!(vm.full_address, "123 Main<br>Portland");
    }

    #[test]
    fn test_name_joined_with_space() {
        let vm = CustomerViewModel::build(&customer(), Vec::new());
        assert_eq!(vm.name, "Mary Sullivan");
    }

    #[test]
    fn test_order_urls_and_input_order() {
        let vm = CustomerViewModel::build(&customer(), vec![order("A-100"), order("A-101")]);

        let views: Vec<OrderView> = vm.orders.iter().collect();
        assert_eq!(views.len(), 2);
        assert_eq!(views.first().map(|v| v.url.as_str()), Some("/orders/A-100"));
        assert_eq!(views.get(1).map(|v| v.url.as_str()), Some("/orders/A-101"));
    }

    #[test]
    fn test_order_projection_is_restartable() {
        let vm = CustomerViewModel::build(&customer(), vec![order("A-100")]);

        let first: Vec<OrderView> = vm.orders.iter().collect();
        let second: Vec<OrderView> = vm.orders.iter().collect();
        assert_eq!(first, second);
    }
}
