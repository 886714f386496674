//! Typed entity records and the generic collection listing built on [`Requester::get`].
//!
//! Each resource type only declares its record shape and its collection path through
//! [`Entity`]; listing, fetching, and decoding are shared.

pub mod country;

pub use country::*;

// self
use crate::{
	_prelude::*,
	error::PayloadError,
	http::HttpClient,
	requester::{Params, Requester},
};

time::serde::format_description!(
	timestamp,
	PrimitiveDateTime,
	"[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
);

/// Largest page the API serves for one collection request.
pub const MAX_LIMIT: u32 = 1000;

/// Record type served under a fixed collection path.
pub trait Entity
where
	Self: DeserializeOwned,
{
	/// Collection path relative to the endpoint, e.g. `entity/country`.
	const PATH: &'static str;
}

/// Opaque cross-reference to another resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Meta {
	/// Link to the referenced resource or collection.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub href: Option<String>,
	/// Link to the resource type's metadata.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub metadata_href: Option<String>,
	/// Resource type name.
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Media type of the referenced document.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub media_type: Option<String>,
	/// Link to the resource in the web UI.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub uuid_href: Option<String>,
	/// Download link for file-like resources.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub download_href: Option<String>,
	/// Total number of elements (collections only).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub size: Option<u64>,
	/// Page size (collections only).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub limit: Option<u64>,
	/// Page offset (collections only).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub offset: Option<u64>,
	/// Link to the next page (collections only).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub next_href: Option<String>,
	/// Link to the previous page (collections only).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub previous_href: Option<String>,
}

/// Field holding a [`Meta`], the shape used for `owner`, `group`, and similar references.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaRef {
	/// Reference descriptor.
	pub meta: Meta,
}

/// Request context echoed by collection responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
	/// Employee the request was made as.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub employee: Option<MetaRef>,
}

/// Decoded collection listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionAnswer<T> {
	/// Request context.
	#[serde(default)]
	pub context: Context,
	/// Collection metadata with paging information.
	#[serde(default)]
	pub meta: Meta,
	/// Records on this page.
	#[serde(default = "Vec::new")]
	pub rows: Vec<T>,
}
impl<T> CollectionAnswer<T> {
	/// Whether the server advertises a further page.
	pub fn has_next(&self) -> bool {
		self.meta.next_href.is_some()
	}
}

/// Sort direction for [`ListQuery::order_by`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
	/// Ascending.
	Asc,
	/// Descending.
	Desc,
}
impl Direction {
	const fn as_str(self) -> &'static str {
		match self {
			Direction::Asc => "asc",
			Direction::Desc => "desc",
		}
	}
}

/// Query parameters for a collection listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
	/// Page size, capped at [`MAX_LIMIT`].
	pub limit: Option<u32>,
	/// Page offset.
	pub offset: Option<u32>,
	/// Free-text search.
	pub search: Option<String>,
	/// `field=value` filter conditions, joined with `;`.
	pub filters: Vec<(String, String)>,
	/// Sort keys, joined with `;`.
	pub order: Vec<(String, Direction)>,
	/// Nested references to expand.
	pub expand: Vec<String>,
	/// Additional raw parameters.
	pub extra: Params,
}
impl ListQuery {
	/// Creates an empty query.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the page size, capped at [`MAX_LIMIT`].
	pub fn limit(mut self, limit: u32) -> Self {
		self.limit = Some(limit.min(MAX_LIMIT));

		self
	}

	/// Sets the page offset.
	pub fn offset(mut self, offset: u32) -> Self {
		self.offset = Some(offset);

		self
	}

	/// Sets the free-text search.
	pub fn search(mut self, search: impl Into<String>) -> Self {
		self.search = Some(search.into());

		self
	}

	/// Adds a `field=value` filter condition.
	pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
		self.filters.push((field.into(), value.into()));

		self
	}

	/// Adds a sort key.
	pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
		self.order.push((field.into(), direction));

		self
	}

	/// Adds a reference to expand.
	pub fn expand(mut self, field: impl Into<String>) -> Self {
		self.expand.push(field.into());

		self
	}

	/// Adds a raw parameter.
	pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra.insert(key.into(), value.into());

		self
	}

	/// Renders the query as request parameters.
	pub fn to_params(&self) -> Params {
		let mut params = self.extra.clone();

		if let Some(limit) = self.limit {
			params.insert("limit".into(), limit.to_string());
		}
		if let Some(offset) = self.offset {
			params.insert("offset".into(), offset.to_string());
		}
		if let Some(search) = &self.search {
			params.insert("search".into(), search.clone());
		}
		if !self.filters.is_empty() {
			let filter = self
				.filters
				.iter()
				.map(|(field, value)| format!("{field}={value}"))
				.collect::<Vec<_>>()
				.join(";");

			params.insert("filter".into(), filter);
		}
		if !self.order.is_empty() {
			let order = self
				.order
				.iter()
				.map(|(field, direction)| format!("{field},{}", direction.as_str()))
				.collect::<Vec<_>>()
				.join(";");

			params.insert("order".into(), order);
		}
		if !self.expand.is_empty() {
			params.insert("expand".into(), self.expand.join(","));
		}

		params
	}
}

impl<C> Requester<C>
where
	C: HttpClient,
{
	/// Lists one page of the `T` collection.
	pub fn list<T>(&self, query: &ListQuery) -> Result<CollectionAnswer<T>>
	where
		T: Entity,
	{
		let params = query.to_params();
		let body = self.get(T::PATH, Some(&params))?;

		Ok(decode_entity(T::PATH, body)?)
	}

	/// Fetches one `T` record by identifier.
	pub fn fetch<T>(&self, id: Uuid) -> Result<T>
	where
		T: Entity,
	{
		let body = self.get(&format!("{}/{id}", T::PATH), None)?;

		Ok(decode_entity(T::PATH, body)?)
	}
}

fn decode_entity<T>(entity: &'static str, body: Value) -> Result<T, PayloadError>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(body).map_err(|source| PayloadError::Entity { entity, source })
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn list_query_renders_api_parameters() {
		let params = ListQuery::new()
			.limit(5_000)
			.offset(100)
			.search("Рос")
			.filter("code", "643")
			.filter("updated>", "2024-01-01 00:00:00")
			.order_by("name", Direction::Asc)
			.order_by("code", Direction::Desc)
			.expand("owner")
			.expand("group")
			.param("momentFrom", "2024-01-01")
			.to_params();

		assert_eq!(params.get("limit").map(String::as_str), Some("1000"));
		assert_eq!(params.get("offset").map(String::as_str), Some("100"));
		assert_eq!(params.get("search").map(String::as_str), Some("Рос"));
		assert_eq!(
			params.get("filter").map(String::as_str),
			Some("code=643;updated>=2024-01-01 00:00:00")
		);
		assert_eq!(params.get("order").map(String::as_str), Some("name,asc;code,desc"));
		assert_eq!(params.get("expand").map(String::as_str), Some("owner,group"));
		assert_eq!(params.get("momentFrom").map(String::as_str), Some("2024-01-01"));
		assert!(ListQuery::new().to_params().is_empty());
	}

	#[test]
	fn collection_answer_tolerates_missing_sections() {
		let answer: CollectionAnswer<Country> =
			decode_entity("entity/country", json!({"rows": [{"name": "Россия"}]}))
				.expect("Sparse listing should decode.");

		assert_eq!(answer.rows.len(), 1);
		assert_eq!(answer.rows[0].name.as_deref(), Some("Россия"));
		assert!(answer.context.employee.is_none());
		assert!(!answer.has_next());
	}

	#[test]
	fn decode_errors_carry_the_json_path() {
		let err = decode_entity::<CollectionAnswer<Country>>(
			"entity/country",
			json!({"rows": [{"name": "ok"}, {"updated": "yesterday"}]}),
		)
		.expect_err("Bad timestamp must fail.");

		match err {
			PayloadError::Entity { entity, source } => {
				assert_eq!(entity, "entity/country");
				assert_eq!(source.path().to_string(), "rows[1].updated");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn meta_serializes_only_present_fields() {
		let meta = Meta {
			href: Some("https://api.example.com/api/remap/1.2/entity/country/1".into()),
			kind: Some("country".into()),
			media_type: Some("application/json".into()),
			..Meta::default()
		};

		assert_eq!(
			serde_json::to_value(MetaRef { meta }).expect("Meta should serialize."),
			json!({"meta": {
				"href": "https://api.example.com/api/remap/1.2/entity/country/1",
				"type": "country",
				"mediaType": "application/json"
			}})
		);
	}
}
