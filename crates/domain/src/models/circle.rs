//! Wire models for the location-sharing API.
//!
//! These mirror the JSON the remote service returns; field names are camelCase
//! on the wire. Circles are fetched fresh every poll cycle and discarded once
//! the cycle's events have been produced.

use serde::{Deserialize, Serialize};

/// Response body of the circles-list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CirclesResponse {
    pub circles: Vec<CircleSummary>,
}

/// One entry of the circles-list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleSummary {
    pub id: String,
    pub name: String,
}

/// Full circle detail: display name plus current members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub id: String,
    pub name: String,
    pub members: Vec<Member>,
}

/// A person within a circle.
///
/// `location` is absent whenever the member's device has not reported a
/// position; that member is simply skipped for the cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub login_phone: String,
    #[serde(default)]
    pub location: Option<MemberLocation>,
}

/// Current position of a member.
///
/// Battery is source-supplied text and passes through to the event untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub battery: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_response_deserializes() {
        let json = r#"{"circles": [{"id": "c-1", "name": "Family"}, {"id": "c-2", "name": "Friends"}]}"#;
        let resp: CirclesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.circles.len(), 2);
        assert_eq!(resp.circles[0].id, "c-1");
        assert_eq!(resp.circles[1].name, "Friends");
    }

    #[test]
    fn test_member_with_location() {
        let json = r#"{
            "id": "m-1",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "loginPhone": "+15551234567",
            "location": {"latitude": 37.7749, "longitude": -122.4194, "battery": "88"}
        }"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.first_name, "Ada");
        let loc = member.location.unwrap();
        assert_eq!(loc.latitude, 37.7749);
        assert_eq!(loc.battery, "88");
    }

    #[test]
    fn test_member_with_null_location() {
        let json = r#"{
            "id": "m-2",
            "firstName": "Alan",
            "lastName": "Turing",
            "loginPhone": "+15550000000",
            "location": null
        }"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert!(member.location.is_none());
    }

    #[test]
    fn test_member_with_missing_location_field() {
        let json = r#"{
            "id": "m-3",
            "firstName": "Grace",
            "lastName": "Hopper",
            "loginPhone": "+15559999999"
        }"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert!(member.location.is_none());
    }

    #[test]
    fn test_circle_detail_deserializes() {
        let json = r#"{
            "id": "c-1",
            "name": "Family",
            "members": [
                {"id": "m-1", "firstName": "Ada", "lastName": "Lovelace",
                 "loginPhone": "+15551234567",
                 "location": {"latitude": 1.0, "longitude": 2.0, "battery": "50"}}
            ]
        }"#;
        let circle: Circle = serde_json::from_str(json).unwrap();
        assert_eq!(circle.name, "Family");
        assert_eq!(circle.members.len(), 1);
    }
}
