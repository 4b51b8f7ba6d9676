use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub personal: Personal,
    pub family: Family,
    pub education: Education,
    pub previous_experience: Vec<Experience>,
    pub bank_details: BankDetails,
    pub documents: Documents,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Personal {
    pub name: String,
    pub father_name: String,
    pub phone: String,
    pub address: String,
    pub present_address: String,
    pub email: String,
    pub dob: Option<DateTime>,
    pub nationality: String,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub spouse_name: String,
    pub children_names: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Family {
    pub mother_name: String,
    pub father_name: String,
    pub siblings: String,
    pub emergency_contact: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub tenth_stream: String,
    pub tenth_percent: f64,
    pub twelfth_stream: String,
    pub twelfth_percent: f64,
    pub ug_percent: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub company_name: String,
    pub position: String,
    pub from_date: Option<DateTime>,
    pub to_date: Option<DateTime>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BankDetails {
    pub ifsc_code: String,
    pub account_number: String,
}

/// Upload descriptor for one stored file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct FileDescriptor {
    pub filename: String,
    pub path: String,
    pub mimetype: String,
    pub size: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Documents {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenth_marksheet: Option<FileDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twelfth_marksheet: Option<FileDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree_certificate: Option<FileDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aadhar: Option<FileDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan: Option<FileDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<FileDescriptor>,
}

impl Documents {
    pub fn slot_mut(&mut self, slot: DocumentSlot) -> &mut Option<FileDescriptor> {
        match slot {
            DocumentSlot::TenthMarksheet => &mut self.tenth_marksheet,
            DocumentSlot::TwelfthMarksheet => &mut self.twelfth_marksheet,
            DocumentSlot::DegreeCertificate => &mut self.degree_certificate,
            DocumentSlot::Aadhar => &mut self.aadhar,
            DocumentSlot::Pan => &mut self.pan,
            DocumentSlot::Photo => &mut self.photo,
        }
    }
}

/// The form fields that may carry a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentSlot {
    TenthMarksheet,
    TwelfthMarksheet,
    DegreeCertificate,
    Aadhar,
    Pan,
    Photo,
}

impl DocumentSlot {
    pub const ALL: [DocumentSlot; 6] = [
        DocumentSlot::TenthMarksheet,
        DocumentSlot::TwelfthMarksheet,
        DocumentSlot::DegreeCertificate,
        DocumentSlot::Aadhar,
        DocumentSlot::Pan,
        DocumentSlot::Photo,
    ];

    pub fn field_name(self) -> &'static str {
        match self {
            DocumentSlot::TenthMarksheet => "tenthMarksheet",
            DocumentSlot::TwelfthMarksheet => "twelfthMarksheet",
            DocumentSlot::DegreeCertificate => "degreeCertificate",
            DocumentSlot::Aadhar => "aadhar",
            DocumentSlot::Pan => "pan",
            DocumentSlot::Photo => "photo",
        }
    }

    pub fn from_field_name(name: &str) -> Option<DocumentSlot> {
        DocumentSlot::ALL
            .into_iter()
            .find(|slot| slot.field_name() == name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Gender {
    Male,
    Female,
    #[serde(rename = "Prefer not to say")]
    PreferNotToSay,
    Others,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

impl Gender {
    pub fn parse(value: &str) -> Option<Gender> {
        match value {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            "Prefer not to say" => Some(Gender::PreferNotToSay),
            "Others" => Some(Gender::Others),
            "" => Some(Gender::Unspecified),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

impl MaritalStatus {
    pub fn parse(value: &str) -> Option<MaritalStatus> {
        match value {
            "Single" => Some(MaritalStatus::Single),
            "Married" => Some(MaritalStatus::Married),
            "Divorced" => Some(MaritalStatus::Divorced),
            "Widowed" => Some(MaritalStatus::Widowed),
            "" => Some(MaritalStatus::Unspecified),
            _ => None,
        }
    }
}

/// What the listing query reads back: identity, timestamps and contact details.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EmployeeSummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime>,
    #[serde(default)]
    pub personal: PersonalSummary,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PersonalSummary {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl EmployeeSummary {
    pub fn of(id: ObjectId, employee: &Employee) -> EmployeeSummary {
        EmployeeSummary {
            id,
            created_at: Some(employee.created_at),
            updated_at: Some(employee.updated_at),
            personal: PersonalSummary {
                name: employee.personal.name.clone(),
                email: employee.personal.email.clone(),
                phone: employee.personal.phone.clone(),
            },
        }
    }
}
