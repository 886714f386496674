//! Country directory records (`entity/country`).

// crates.io
use time::PrimitiveDateTime;
// self
use crate::{
	_prelude::*,
	entity::{CollectionAnswer, Entity, ListQuery, Meta, MetaRef, timestamp},
	http::HttpClient,
	requester::Requester,
};

/// Country record. All fields are optional in the payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Country {
	/// Self reference.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub meta: Option<Meta>,
	/// Record identifier.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<Uuid>,
	/// Account the record belongs to.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub account_id: Option<Uuid>,
	/// Display name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Numeric country code.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub code: Option<String>,
	/// Free-form description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Code in an external system.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub external_code: Option<String>,
	/// Last modification time (server local time).
	#[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
	pub updated: Option<PrimitiveDateTime>,
	/// Owning department.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub group: Option<MetaRef>,
	/// Owning employee.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub owner: Option<MetaRef>,
	/// Whether the record is shared with every employee.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub shared: Option<bool>,
}
impl Entity for Country {
	const PATH: &'static str = "entity/country";
}

impl<C> Requester<C>
where
	C: HttpClient,
{
	/// Lists one page of the country directory.
	pub fn list_country(&self, query: &ListQuery) -> Result<CollectionAnswer<Country>> {
		self.list(query)
	}
}
