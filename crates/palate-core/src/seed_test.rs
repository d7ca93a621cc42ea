use super::*;

const VALID: &str = r"
restaurants:
  - title: Joe's Diner Downtown
    place_id: abc123
    address: 12 Main St, Springfield, IL 62701, USA
    city: Springfield
    state: IL
    latitude: 39.7990
    longitude: -89.6440
    price_level: 2
  - title: Corner Noodle Bar
    address: 400 Elm Ave, Springfield
";

#[test]
fn parses_valid_seed_file() {
    let file = parse_seed_file(VALID).expect("valid seed file");
    assert_eq!(file.restaurants.len(), 2);
    assert_eq!(file.restaurants[0].place_id.as_deref(), Some("abc123"));
    assert!(file.restaurants[1].latitude.is_none());
}

#[test]
fn to_new_restaurant_trims_title_and_maps_place_id() {
    let file = parse_seed_file(VALID).expect("valid seed file");
    let new = file.restaurants[0].to_new_restaurant();
    assert_eq!(new.external_id.as_deref(), Some("abc123"));
    assert_eq!(new.title, "Joe's Diner Downtown");
    assert_eq!(new.price_level, Some(2));
}

#[test]
fn rejects_blank_title() {
    let yaml = "restaurants:\n  - title: '   '\n";
    let result = parse_seed_file(yaml);
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
fn rejects_half_coordinates() {
    let yaml = "restaurants:\n  - title: Half\n    latitude: 40.0\n";
    let err = parse_seed_file(yaml).unwrap_err();
    assert!(
        err.to_string().contains("must both be set"),
        "unexpected error: {err}"
    );
}

#[test]
fn rejects_out_of_range_latitude() {
    let yaml = "restaurants:\n  - title: Nowhere\n    latitude: 91.0\n    longitude: 0.0\n";
    assert!(matches!(
        parse_seed_file(yaml),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn rejects_invalid_price_level() {
    let yaml = "restaurants:\n  - title: Pricey\n    price_level: 5\n";
    assert!(matches!(
        parse_seed_file(yaml),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn rejects_duplicate_place_ids() {
    let yaml = "restaurants:\n  - title: A\n    place_id: p1\n  - title: B\n    place_id: p1\n";
    let err = parse_seed_file(yaml).unwrap_err();
    assert!(err.to_string().contains("duplicate place_id"));
}

#[test]
fn empty_strings_are_not_stored() {
    let yaml = "restaurants:\n  - title: A\n    place_id: ''\n    address: ''\n  - title: B\n    place_id: ''\n";
    let file = parse_seed_file(yaml).expect("empty place ids are not duplicates");
    let new = file.restaurants[0].to_new_restaurant();
    assert!(new.external_id.is_none());
    assert!(new.address.is_none());
}

#[test]
fn malformed_yaml_is_parse_error() {
    let result = parse_seed_file("restaurants: [this is not: valid");
    assert!(matches!(result, Err(ConfigError::SeedFileParse(_))));
}

#[test]
fn missing_file_is_io_error() {
    let result = load_seed_file(Path::new("/definitely/not/here/restaurants.yaml"));
    assert!(matches!(result, Err(ConfigError::SeedFileIo { .. })));
}
