pub mod controller;
mod publisher;

pub use controller::OverviewController;
pub use publisher::RefreshPolicy;

use crate::models::Property;
use crate::network::Result;

/// Display text for a raw-body fetch: the body itself, or the error message
pub fn describe_response(response: &Result<String>) -> String {
    match response {
        Ok(body) => format!("Success: {body}"),
        Err(e) => format!("Failure: {e}"),
    }
}

/// One-line summary of a decoded fetch
pub fn describe_properties(properties: &[Property]) -> String {
    format!("Success: {} Mars properties retrieved", properties.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Error;

    #[test]
    fn describes_raw_success_and_failure() {
        assert_eq!(describe_response(&Ok("[]".to_string())), "Success: []");
        assert_eq!(
            describe_response(&Err(Error::Network("connection refused".to_string()))),
            "Failure: network error: connection refused"
        );
    }

    #[test]
    fn describes_property_count() {
        assert_eq!(describe_properties(&[]), "Success: 0 Mars properties retrieved");
    }
}
