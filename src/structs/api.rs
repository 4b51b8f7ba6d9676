use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::employee::EmployeeSummary;

/// Text fields of an onboarding submission, as they arrived.
#[derive(Debug, Default)]
pub struct OnboardForm {
    pub name: Option<String>,
    pub father_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub present_address: Option<String>,
    pub email: Option<String>,
    pub dob: Option<String>,
    pub nationality: Option<String>,
    pub gender: Option<String>,
    pub marital_status: Option<String>,
    pub spouse_name: Option<String>,
    pub children_names: Vec<String>,
    pub mother_name: Option<String>,
    pub father_name_family: Option<String>,
    pub siblings: Option<String>,
    pub emergency_contact: Option<String>,
    pub tenth_stream: Option<String>,
    pub tenth_percent: Option<String>,
    pub twelfth_stream: Option<String>,
    pub twelfth_percent: Option<String>,
    pub ug_percent: Option<String>,
    pub previous_experience: Option<String>,
    pub ifsc_code: Option<String>,
    pub account_number: Option<String>,
}

impl OnboardForm {
    /// Stores one text part. Unknown names are ignored and repeated scalars keep the last value.
    pub fn assign(&mut self, field: &str, value: String) {
        let slot = match field {
            "name" => &mut self.name,
            "fatherName" => &mut self.father_name,
            "phone" => &mut self.phone,
            "address" => &mut self.address,
            "presentAddress" => &mut self.present_address,
            "email" => &mut self.email,
            "dob" => &mut self.dob,
            "nationality" => &mut self.nationality,
            "gender" => &mut self.gender,
            "maritalStatus" => &mut self.marital_status,
            "spouseName" => &mut self.spouse_name,
            "motherName" => &mut self.mother_name,
            "fatherNameFamily" => &mut self.father_name_family,
            "siblings" => &mut self.siblings,
            "emergencyContact" => &mut self.emergency_contact,
            "tenthStream" => &mut self.tenth_stream,
            "tenthPercent" => &mut self.tenth_percent,
            "twelfthStream" => &mut self.twelfth_stream,
            "twelfthPercent" => &mut self.twelfth_percent,
            "ugPercent" => &mut self.ug_percent,
            "previousExperience" => &mut self.previous_experience,
            "ifscCode" => &mut self.ifsc_code,
            "accountNumber" => &mut self.account_number,
            "childrenNames" | "childrenNames[]" => {
                self.children_names.push(value);
                return;
            }
            _ => return,
        };
        *slot = Some(value);
    }

    /// Stores one JSON member. Numbers and booleans become their text, arrays under
    /// `childrenNames` add one entry per item, other arrays and objects keep their JSON text.
    pub fn assign_json(&mut self, field: &str, value: Value) {
        match value {
            Value::Null => {}
            Value::String(text) => self.assign(field, text),
            Value::Number(number) => self.assign(field, number.to_string()),
            Value::Bool(flag) => self.assign(field, flag.to_string()),
            Value::Array(items) if field == "childrenNames" => {
                for item in items {
                    self.assign_json(field, item);
                }
            }
            nested => self.assign(field, nested.to_string()),
        }
    }
}

/// JSON submissions arrive as one object whose members go through [`OnboardForm::assign_json`].
impl<'de> Deserialize<'de> for OnboardForm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let members = serde_json::Map::<String, Value>::deserialize(deserializer)?;
        let mut form = OnboardForm::default();
        for (name, value) in members {
            form.assign_json(&name, value);
        }
        Ok(form)
    }
}

/// One entry of the JSON-encoded `previousExperience` field.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub company_name: String,
    pub position: String,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedBody {
    pub ok: bool,
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthBody {
    pub ok: bool,
    pub db: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmployeeListItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
    pub personal: ContactBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactBody {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<EmployeeSummary> for EmployeeListItem {
    fn from(summary: EmployeeSummary) -> Self {
        EmployeeListItem {
            id: summary.id.to_hex(),
            created_at: summary.created_at.map(|timestamp| timestamp.to_chrono()),
            updated_at: summary.updated_at.map(|timestamp| timestamp.to_chrono()),
            personal: ContactBody {
                name: summary.personal.name,
                email: summary.personal.email,
                phone: summary.personal.phone,
            },
        }
    }
}
