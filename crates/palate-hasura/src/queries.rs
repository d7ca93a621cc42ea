//! GraphQL documents sent to Hasura.

const RESTAURANT_FIELDS: &str = "id external_id title slug address city state postal_code \
     country latitude longitude image_url price_level rating review_count created_at";

pub(crate) fn by_external_id() -> String {
    format!(
        "query RestaurantByExternalId($externalId: String!) {{ \
         restaurants(where: {{external_id: {{_eq: $externalId}}}}, limit: 1) {{ {RESTAURANT_FIELDS} }} }}"
    )
}

pub(crate) fn by_title_and_address() -> String {
    format!(
        "query RestaurantsByTitleAndAddress($title: String!, $address: String!) {{ \
         restaurants(where: {{_and: [{{title: {{_ilike: $title}}}}, {{address: {{_ilike: $address}}}}]}}, \
         order_by: [{{created_at: asc}}, {{id: asc}}]) {{ {RESTAURANT_FIELDS} }} }}"
    )
}

pub(crate) fn with_coordinates() -> String {
    format!(
        "query RestaurantsWithCoordinates {{ \
         restaurants(where: {{_and: [{{latitude: {{_is_null: false}}}}, {{longitude: {{_is_null: false}}}}]}}, \
         order_by: [{{created_at: asc}}, {{id: asc}}]) {{ {RESTAURANT_FIELDS} }} }}"
    )
}

pub(crate) fn insert_one() -> String {
    format!(
        "mutation InsertRestaurant($object: restaurants_insert_input!) {{ \
         insert_restaurants_one(object: $object) {{ {RESTAURANT_FIELDS} }} }}"
    )
}

pub(crate) const PING: &str = "query Ping { __typename }";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_use_hasura_operators() {
        assert!(by_external_id().contains("external_id: {_eq: $externalId}"));
        assert!(by_title_and_address().contains("title: {_ilike: $title}"));
        assert!(by_title_and_address().contains("address: {_ilike: $address}"));
        assert!(with_coordinates().contains("latitude: {_is_null: false}"));
        assert!(insert_one().contains("insert_restaurants_one(object: $object)"));
    }

    #[test]
    fn every_read_selects_the_full_row() {
        for doc in [by_external_id(), by_title_and_address(), with_coordinates()] {
            assert!(doc.contains(RESTAURANT_FIELDS), "missing fields in {doc}");
        }
    }
}
