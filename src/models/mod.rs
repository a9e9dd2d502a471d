use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Listing type tag for properties that are offered for rent
pub const RENT_TYPE: &str = "rent";

/// Core property data model, as returned by the realestate endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: String,
    #[serde(rename = "img_src")]
    pub img_src_url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: f64,
}

impl Property {
    pub fn is_rental(&self) -> bool {
        self.kind == RENT_TYPE
    }
}

/// Query values accepted by the `filter` parameter of the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    Rent,
    Buy,
    #[default]
    All,
}

impl Filter {
    pub fn as_query_value(self) -> &'static str {
        match self {
            Filter::Rent => "rent",
            Filter::Buy => "buy",
            Filter::All => "all",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rent" => Ok(Filter::Rent),
            "buy" => Ok(Filter::Buy),
            "all" => Ok(Filter::All),
            other => Err(format!("unknown filter '{other}', expected rent, buy or all")),
        }
    }
}

/// Outcome of the most recent fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Loading,
    Error,
    Done,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_rental_property_from_wire_format() {
        let json = r#"{"id":"424","img_src":"https://x/y.png","type":"rent","price":100000}"#;
        let property: Property = serde_json::from_str(json).unwrap();

        assert_eq!(
            property,
            Property {
                id: "424".to_string(),
                img_src_url: "https://x/y.png".to_string(),
                kind: "rent".to_string(),
                price: 100000.0,
            }
        );
        assert!(property.is_rental());
    }

    #[test]
    fn buy_property_is_not_rental() {
        let json = r#"{"id":"425","img_src":"https://x/z.png","type":"buy","price":450000.5}"#;
        let property: Property = serde_json::from_str(json).unwrap();

        assert!(!property.is_rental());
        assert_eq!(property.price, 450000.5);
    }

    #[test]
    fn missing_field_is_a_decode_error() {
        let json = r#"{"id":"426","type":"buy","price":1}"#;
        assert!(serde_json::from_str::<Property>(json).is_err());
    }

    #[test]
    fn serializes_back_to_wire_names() {
        let property = Property {
            id: "1".to_string(),
            img_src_url: "https://x/1.png".to_string(),
            kind: "buy".to_string(),
            price: 10.0,
        };
        let value = serde_json::to_value(&property).unwrap();

        assert_eq!(value["img_src"], "https://x/1.png");
        assert_eq!(value["type"], "buy");
        assert!(value.get("img_src_url").is_none());
    }

    #[test]
    fn filter_parses_query_values() {
        assert_eq!("rent".parse::<Filter>(), Ok(Filter::Rent));
        assert_eq!(" BUY ".parse::<Filter>(), Ok(Filter::Buy));
        assert_eq!("all".parse::<Filter>(), Ok(Filter::All));
        assert!("sell".parse::<Filter>().is_err());
        assert_eq!(Filter::default(), Filter::All);
        assert_eq!(Filter::Rent.to_string(), "rent");
    }
}
