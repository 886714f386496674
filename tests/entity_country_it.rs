#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use moysklad_client::{
	Error,
	entity::{Country, Direction, ListQuery},
	error::PayloadError,
	url::Url,
};

use common::{build_test_requester, mock_builder, mock_requester};

const COUNTRY_ID: &str = "9df7c2c3-7782-4c5c-a8ed-1102af611608";

fn listing(server: &MockServer) -> serde_json::Value {
	json!({
		"context": {"employee": {"meta": {"href": server.url("/api/remap/1.2/context/employee"), "type": "employee"}}},
		"meta": {
			"href": server.url("/api/remap/1.2/entity/country"),
			"type": "country",
			"mediaType": "application/json",
			"size": 2,
			"limit": 1,
			"offset": 0,
			"nextHref": server.url("/api/remap/1.2/entity/country?limit=1&offset=1")
		},
		"rows": [{
			"id": COUNTRY_ID,
			"updated": "2023-05-10 12:33:05.123",
			"name": "РОССИЯ",
			"code": "643",
			"shared": true
		}]
	})
}

#[test]
fn list_country_decodes_typed_rows() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET)
			.path("/api/remap/1.2/entity/country")
			.query_param("limit", "1")
			.query_param("filter", "code=643")
			.query_param("order", "name,asc");
		then.status(200).json_body(listing(&server));
	});
	let requester = build_test_requester(
		mock_builder(&server, "abc123")
			.endpoint(Url::parse(&server.url("/api/remap/1.2")).expect("Mock URL should parse.")),
	);
	let answer = requester
		.list_country(
			&ListQuery::new().limit(1).filter("code", "643").order_by("name", Direction::Asc),
		)
		.expect("Country listing should decode.");

	assert_eq!(answer.meta.size, Some(2));
	assert!(answer.has_next());
	assert_eq!(answer.rows.len(), 1);
	assert_eq!(answer.rows[0].name.as_deref(), Some("РОССИЯ"));
	assert_eq!(answer.rows[0].id.map(|id| id.to_string()).as_deref(), Some(COUNTRY_ID));
	assert!(answer.context.employee.is_some());

	mock.assert();
}

#[test]
fn fetch_reads_one_record_by_id() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET).path(format!("/api/remap/1.2/entity/country/{COUNTRY_ID}"));
		then.status(200).json_body(json!({"id": COUNTRY_ID, "name": "РОССИЯ"}));
	});
	let requester = mock_requester(&server, "abc123");
	let id = COUNTRY_ID.parse().expect("Fixture UUID should parse.");
	let country: Country = requester.fetch(id).expect("Country should decode.");

	assert_eq!(country.name.as_deref(), Some("РОССИЯ"));

	mock.assert();
}

#[test]
fn listing_errors_are_classified_before_decoding() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET).path("/api/remap/1.2/entity/country");
		then.status(429).json_body(json!({"errors": [{"code": 1049, "error": "Превышено ограничение"}]}));
	});
	let requester = mock_requester(&server, "abc123");
	let err = requester.list_country(&ListQuery::new()).expect_err("Server error should surface.");

	assert!(matches!(err, Error::RateLimited { .. }));

	mock.assert();
}

#[test]
fn malformed_rows_report_the_json_path() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET).path("/api/remap/1.2/entity/country");
		then.status(200).json_body(json!({"rows": [{"id": "not-a-uuid"}]}));
	});
	let requester = mock_requester(&server, "abc123");
	let err = requester.list_country(&ListQuery::new()).expect_err("Bad UUID should fail.");

	match err {
		Error::Payload(PayloadError::Entity { source, .. }) =>
			assert_eq!(source.path().to_string(), "rows[0].id"),
		other => panic!("Unexpected error variant: {other:?}."),
	}

	mock.assert();
}
