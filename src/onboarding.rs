use axum::body::{Body, Bytes};
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use mongodb::bson;

use crate::coercion::{coerce_date, coerce_number};
use crate::error::{Error, Result};
use crate::structs::api::{ExperienceEntry, OnboardForm};
use crate::structs::employee::{
    BankDetails, DocumentSlot, Documents, Education, Employee, Experience, Family, Gender,
    MaritalStatus, Personal,
};
use crate::uploads::UploadDirectory;

/// Bytes tolerated after the closing delimiter of a multipart body without parts.
const TRAILING_SLACK: usize = 4;

/// True when the request declares a JSON body.
pub fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

/// Reads a multipart/form-data submission.
///
/// A body holding nothing but the closing delimiter is an empty form rather than an error.
pub async fn read_multipart(
    request: Request,
    uploads: &UploadDirectory,
) -> Result<(OnboardForm, Documents)> {
    let (parts, body) = request.into_parts();
    let boundary = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(multipart_boundary)
        .map(str::to_owned);

    let body = match boundary {
        Some(boundary) => match replay_unless_empty(body, &boundary).await? {
            Some(body) => body,
            None => return Ok((OnboardForm::default(), Documents::default())),
        },
        None => body,
    };

    let multipart = Multipart::from_request(Request::from_parts(parts, body), &())
        .await
        .map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
    read_submission(multipart, uploads).await
}

/// Drains the multipart body: text parts fill the form, file parts are written to disk.
///
/// Files written before a later part fails stay on disk.
pub async fn read_submission(
    mut multipart: Multipart,
    uploads: &UploadDirectory,
) -> Result<(OnboardForm, Documents)> {
    let mut form = OnboardForm::default();
    let mut documents = Documents::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match field.file_name().map(str::is_empty) {
            None => form.assign(&name, field.text().await?),
            // "no file chosen"
            Some(true) => continue,
            Some(false) => {
                let slot = DocumentSlot::from_field_name(&name)
                    .ok_or_else(|| Error::UnexpectedFile { field: name.clone() })?;
                if documents.slot_mut(slot).is_some() {
                    return Err(Error::UnexpectedFile { field: name });
                }
                *documents.slot_mut(slot) = Some(uploads.store(field).await?);
            }
        }
    }

    Ok((form, documents))
}

fn multipart_boundary(content_type: &str) -> Option<&str> {
    let mut params = content_type.split(';');
    let essence = params.next()?.trim();
    if !essence.eq_ignore_ascii_case("multipart/form-data") {
        return None;
    }
    params.find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("boundary")
            .then(|| value.trim().trim_matches('"'))
    })
}

/// Reads just enough of `body` to tell whether it is only a closing delimiter.
/// Returns `None` for such a body, otherwise an equivalent body that replays what was read.
async fn replay_unless_empty(body: Body, boundary: &str) -> Result<Option<Body>> {
    let closing = format!("--{boundary}--");
    let limit = closing.len() + TRAILING_SLACK;
    let mut stream = body.into_data_stream();
    let mut head: Vec<Bytes> = Vec::new();
    let mut seen = 0;

    loop {
        if seen > limit {
            break;
        }
        match stream.next().await {
            Some(chunk) => {
                let chunk = chunk.map_err(|err| Error::BadRequest(err.to_string()))?;
                seen += chunk.len();
                head.push(chunk);
            }
            None => {
                let bytes: Vec<u8> = head.iter().flat_map(|chunk| chunk.iter().copied()).collect();
                if is_closing_delimiter(&bytes, &closing) {
                    return Ok(None);
                }
                break;
            }
        }
    }

    let replayed = stream::iter(head.into_iter().map(Ok::<Bytes, axum::Error>));
    Ok(Some(Body::from_stream(replayed.chain(stream))))
}

fn is_closing_delimiter(bytes: &[u8], closing: &str) -> bool {
    std::str::from_utf8(bytes)
        .map(|text| text.trim() == closing)
        .unwrap_or(false)
}

impl OnboardForm {
    /// Validates the enumerated fields and builds the record to insert.
    pub fn into_employee(self, documents: Documents, now: DateTime<Utc>) -> Result<Employee> {
        let gender = parse_enum(self.gender, "personal.gender", Gender::parse)?;
        let marital_status =
            parse_enum(self.marital_status, "personal.maritalStatus", MaritalStatus::parse)?;
        let previous_experience = parse_experience(self.previous_experience.as_deref())?;

        let father_name = self.father_name.unwrap_or_default();
        let family_father_name = self
            .father_name_family
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| father_name.clone());
        let timestamp = bson::DateTime::from_chrono(now);

        Ok(Employee {
            id: None,
            personal: Personal {
                name: self.name.unwrap_or_default(),
                father_name,
                phone: self.phone.unwrap_or_default(),
                address: self.address.unwrap_or_default(),
                present_address: self.present_address.unwrap_or_default(),
                email: self.email.unwrap_or_default(),
                dob: stored_date(self.dob.as_deref()),
                nationality: self.nationality.unwrap_or_default(),
                gender,
                marital_status,
                spouse_name: self.spouse_name.unwrap_or_default(),
                children_names: self.children_names,
            },
            family: Family {
                mother_name: self.mother_name.unwrap_or_default(),
                father_name: family_father_name,
                siblings: self.siblings.unwrap_or_default(),
                emergency_contact: self.emergency_contact.unwrap_or_default(),
            },
            education: Education {
                tenth_stream: self.tenth_stream.unwrap_or_default(),
                tenth_percent: coerce_number(self.tenth_percent.as_deref()),
                twelfth_stream: self.twelfth_stream.unwrap_or_default(),
                twelfth_percent: coerce_number(self.twelfth_percent.as_deref()),
                ug_percent: coerce_number(self.ug_percent.as_deref()),
            },
            previous_experience,
            bank_details: BankDetails {
                ifsc_code: self.ifsc_code.unwrap_or_default(),
                account_number: self.account_number.unwrap_or_default(),
            },
            documents,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }
}

fn parse_enum<T: Default>(
    raw: Option<String>,
    path: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<T> {
    match raw {
        None => Ok(T::default()),
        Some(value) => parse(&value).ok_or(Error::InvalidEnumValue { path, value }),
    }
}

fn parse_experience(raw: Option<&str>) -> Result<Vec<Experience>> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(vec![]);
    };
    let entries: Vec<ExperienceEntry> =
        serde_json::from_str(raw).map_err(Error::InvalidExperience)?;

    Ok(entries
        .into_iter()
        .map(|entry| Experience {
            company_name: entry.company_name,
            position: entry.position,
            from_date: stored_date(entry.from_date.as_deref()),
            to_date: stored_date(entry.to_date.as_deref()),
        })
        .collect())
}

fn stored_date(raw: Option<&str>) -> Option<bson::DateTime> {
    coerce_date(raw).map(bson::DateTime::from_chrono)
}
