//! Generic CRUD endpoints shared by all four record kinds.
//!
//! Each kind plugs into the same five handlers through [`Resource`]. Only
//! donation writes carry a sync report in the response.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use soupline_sdk::{
    Donation, Donor, Employee, InventoryItem, Kitchen, NewDonation, NewDonor, NewEmployee,
    NewInventoryItem, RecordId, SdkResult, SyncReport,
};
use soupline_types::Record;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Outcome of a write, as reported back to the client.
pub struct Written {
    pub id: RecordId,
    pub sync: Option<SyncReport>,
}

impl Written {
    fn plain(id: RecordId) -> Self {
        Self { id, sync: None }
    }
}

pub trait Resource: Record + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Input: DeserializeOwned + Send + 'static;

    fn all(kitchen: &Kitchen) -> &[Self];
    fn find<'a>(kitchen: &'a Kitchen, id: &RecordId) -> SdkResult<&'a Self>;
    fn create(kitchen: &mut Kitchen, input: Self::Input) -> SdkResult<Written>;
    fn replace(kitchen: &mut Kitchen, record: Self) -> SdkResult<Written>;
    fn remove(kitchen: &mut Kitchen, id: &RecordId) -> SdkResult<Written>;
}

impl Resource for Donor {
    type Input = NewDonor;

    fn all(kitchen: &Kitchen) -> &[Self] {
        kitchen.donors()
    }
    fn find<'a>(kitchen: &'a Kitchen, id: &RecordId) -> SdkResult<&'a Self> {
        kitchen.get_donor(id)
    }
    fn create(kitchen: &mut Kitchen, input: NewDonor) -> SdkResult<Written> {
        kitchen.add_donor(input).map(|d| Written::plain(d.id))
    }
    fn replace(kitchen: &mut Kitchen, record: Self) -> SdkResult<Written> {
        kitchen.update_donor(record).map(|d| Written::plain(d.id))
    }
    fn remove(kitchen: &mut Kitchen, id: &RecordId) -> SdkResult<Written> {
        kitchen.remove_donor(id).map(|d| Written::plain(d.id))
    }
}

impl Resource for Donation {
    type Input = NewDonation;

    fn all(kitchen: &Kitchen) -> &[Self] {
        kitchen.donations()
    }
    fn find<'a>(kitchen: &'a Kitchen, id: &RecordId) -> SdkResult<&'a Self> {
        kitchen.get_donation(id)
    }
    fn create(kitchen: &mut Kitchen, input: NewDonation) -> SdkResult<Written> {
        kitchen.add_donation(input).map(|s| Written {
            id: s.donation.id,
            sync: Some(s.report),
        })
    }
    fn replace(kitchen: &mut Kitchen, record: Self) -> SdkResult<Written> {
        kitchen.update_donation(record).map(|s| Written {
            id: s.donation.id,
            sync: Some(s.report),
        })
    }
    fn remove(kitchen: &mut Kitchen, id: &RecordId) -> SdkResult<Written> {
        kitchen.remove_donation(id).map(|s| Written {
            id: s.donation.id,
            sync: Some(s.report),
        })
    }
}

impl Resource for InventoryItem {
    type Input = NewInventoryItem;

    fn all(kitchen: &Kitchen) -> &[Self] {
        kitchen.inventory()
    }
    fn find<'a>(kitchen: &'a Kitchen, id: &RecordId) -> SdkResult<&'a Self> {
        kitchen.get_item(id)
    }
    fn create(kitchen: &mut Kitchen, input: NewInventoryItem) -> SdkResult<Written> {
        kitchen.add_item(input).map(|i| Written::plain(i.id))
    }
    fn replace(kitchen: &mut Kitchen, record: Self) -> SdkResult<Written> {
        kitchen.update_item(record).map(|i| Written::plain(i.id))
    }
    fn remove(kitchen: &mut Kitchen, id: &RecordId) -> SdkResult<Written> {
        kitchen.remove_item(id).map(|i| Written::plain(i.id))
    }
}

impl Resource for Employee {
    type Input = NewEmployee;

    fn all(kitchen: &Kitchen) -> &[Self] {
        kitchen.employees()
    }
    fn find<'a>(kitchen: &'a Kitchen, id: &RecordId) -> SdkResult<&'a Self> {
        kitchen.get_employee(id)
    }
    fn create(kitchen: &mut Kitchen, input: NewEmployee) -> SdkResult<Written> {
        kitchen.add_employee(input).map(|e| Written::plain(e.id))
    }
    fn replace(kitchen: &mut Kitchen, record: Self) -> SdkResult<Written> {
        kitchen.update_employee(record).map(|e| Written::plain(e.id))
    }
    fn remove(kitchen: &mut Kitchen, id: &RecordId) -> SdkResult<Written> {
        kitchen.remove_employee(id).map(|e| Written::plain(e.id))
    }
}

#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync: Option<SyncReport>,
}

pub fn parse_id(raw: &str) -> ServerResult<RecordId> {
    raw.parse()
        .map_err(|e: soupline_sdk::ValidationError| ServerError::BadRequest(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: Value) -> ServerResult<T> {
    serde_json::from_value(body).map_err(|e| ServerError::BadRequest(e.to_string()))
}

pub async fn list_records<T: Resource>(
    State(state): State<AppState>,
) -> ServerResult<Json<Vec<T>>> {
    let kitchen = state.read()?;
    Ok(Json(T::all(&kitchen).to_vec()))
}

pub async fn get_record<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<T>> {
    let id = parse_id(&id)?;
    let kitchen = state.read()?;
    Ok(Json(T::find(&kitchen, &id)?.clone()))
}

pub async fn create_record<T: Resource>(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<MutationResponse>)> {
    let Json(body) = payload?;
    let input: T::Input = decode(body)?;
    let written = T::create(&mut *state.write()?, input)?;
    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            message: format!("{} created", T::KIND.noun()),
            id: Some(written.id),
            affected: None,
            sync: written.sync,
        }),
    ))
}

/// Full replacement. The path id wins over any `id` in the body.
pub async fn update_record<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ServerResult<Json<MutationResponse>> {
    let id = parse_id(&id)?;
    let Json(body) = payload?;
    let Value::Object(mut fields) = body else {
        return Err(ServerError::BadRequest("expected a JSON object".into()));
    };
    fields.insert("id".into(), Value::String(id.to_string()));
    let record: T = decode(Value::Object(fields))?;
    let written = T::replace(&mut *state.write()?, record)?;
    Ok(Json(MutationResponse {
        message: format!("{} updated", T::KIND.noun()),
        id: None,
        affected: Some(1),
        sync: written.sync,
    }))
}

pub async fn delete_record<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<MutationResponse>> {
    let id = parse_id(&id)?;
    let written = T::remove(&mut *state.write()?, &id)?;
    Ok(Json(MutationResponse {
        message: format!("{} deleted", T::KIND.noun()),
        id: None,
        affected: Some(1),
        sync: written.sync,
    }))
}
