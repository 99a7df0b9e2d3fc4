use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! define_code_enum {
    ($name:ident, $kind:literal, { $($variant:ident => ($code:literal, $alias:literal, $description:literal)),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }

            pub fn description(self) -> &'static str {
                match self {
                    $($name::$variant => $description),+
                }
            }

            pub fn parse(raw: &str) -> Result<Self, String> {
                let normalized = raw.trim().to_ascii_uppercase();
                $(
                    if normalized == $code || normalized == $alias {
                        return Ok($name::$variant);
                    }
                )+
                Err(format!(
                    "{} must be one of: {}",
                    $kind,
                    Self::ALL
                        .iter()
                        .map(|value| value.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::parse(&raw)
                    .map_err(|err| D::Error::custom(format!("invalid {} `{}`: {}", $kind, raw, err)))
            }
        }
    };
}

define_code_enum!(Branch, "branch", {
    ElectricalElectronics => ("EEE", "ELECTRICAL_ELECTRONICS", "EEE (Electrical & Electronics Engineering)"),
    Mechanical => ("MEC", "MECHANICAL", "MEC (Mechanical Engineering)"),
});

define_code_enum!(CasteCategory, "caste category", {
    Sc => ("SC", "SCHEDULED_CASTE", "SC (Scheduled Caste)"),
    St => ("ST", "SCHEDULED_TRIBE", "ST (Scheduled Tribe)"),
    BcA => ("BC-A", "BC_A", "BC-A (Backward Class A)"),
    BcB => ("BC-B", "BC_B", "BC-B (Backward Class B)"),
    BcC => ("BC-C", "BC_C", "BC-C (Backward Class C)"),
    BcD => ("BC-D", "BC_D", "BC-D (Backward Class D)"),
    Ebc => ("EBC", "ECONOMICALLY_BACKWARD_CLASS", "EBC (Economically Backward Class)"),
    Obc => ("OBC", "OTHER_BACKWARD_CLASS", "OBC (Other Backward Class)"),
    Oc => ("OC", "OPEN_CATEGORY", "OC (Open Category)"),
    Ews => ("EWS", "ECONOMICALLY_WEAKER_SECTION", "EWS (Economically Weaker Section)"),
    Others => ("OTHERS", "OTHER", "Others"),
});

/// Selects one field of a [`RegistrationDraft`](super::RegistrationDraft), in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DraftField {
    FullName,
    PhoneNumber,
    Branch,
    PinNumber,
    CasteCategory,
}

impl DraftField {
    pub const ALL: [DraftField; 5] = [
        DraftField::FullName,
        DraftField::PhoneNumber,
        DraftField::Branch,
        DraftField::PinNumber,
        DraftField::CasteCategory,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::PhoneNumber => "phone_number",
            Self::Branch => "branch",
            Self::PinNumber => "pin_number",
            Self::CasteCategory => "caste_category",
        }
    }

    /// Label shown next to the input on the entry form.
    pub fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::PhoneNumber => "Phone Number",
            Self::Branch => "Branch",
            Self::PinNumber => "PIN Number",
            Self::CasteCategory => "Caste Category",
        }
    }

    /// Shorter label used on the review and confirmation views.
    pub fn review_label(self) -> &'static str {
        match self {
            Self::FullName => "Name",
            Self::PhoneNumber => "Phone",
            Self::Branch => "Branch",
            Self::PinNumber => "PIN",
            Self::CasteCategory => "Caste",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::FullName => "Enter your full name",
            Self::PhoneNumber => "Enter your phone number",
            Self::Branch => "Select your branch",
            Self::PinNumber => "Enter PIN number",
            Self::CasteCategory => "Select your caste category",
        }
    }

    pub fn is_choice(self) -> bool {
        matches!(self, Self::Branch | Self::CasteCategory)
    }

    /// Option descriptions for choice fields; empty for free-text fields.
    pub fn choice_options(self) -> Vec<String> {
        match self {
            Self::Branch => Branch::ALL
                .iter()
                .map(|value| value.description().to_string())
                .collect(),
            Self::CasteCategory => CasteCategory::ALL
                .iter()
                .map(|value| value.description().to_string())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Codes matching [`DraftField::choice_options`] index for index.
    pub fn choice_codes(self) -> Vec<&'static str> {
        match self {
            Self::Branch => Branch::ALL.iter().map(|value| value.as_str()).collect(),
            Self::CasteCategory => CasteCategory::ALL
                .iter()
                .map(|value| value.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "full_name" | "name" => Ok(Self::FullName),
            "phone_number" | "phone" => Ok(Self::PhoneNumber),
            "branch" => Ok(Self::Branch),
            "pin_number" | "pin" => Ok(Self::PinNumber),
            "caste_category" | "caste" => Ok(Self::CasteCategory),
            _ => Err(
                "field must be one of: full_name, phone_number, branch, pin_number, caste_category"
                    .to_string(),
            ),
        }
    }

    /// Turns raw input into a typed update. Text fields take the input as-is;
    /// choice fields parse a code, and blank input clears the choice.
    pub fn parse_update(self, raw: &str) -> Result<FieldUpdate, String> {
        match self {
            Self::FullName => Ok(FieldUpdate::FullName(raw.to_string())),
            Self::PhoneNumber => Ok(FieldUpdate::PhoneNumber(raw.to_string())),
            Self::PinNumber => Ok(FieldUpdate::PinNumber(raw.to_string())),
            Self::Branch => {
                if raw.trim().is_empty() {
                    Ok(FieldUpdate::Branch(None))
                } else {
                    Branch::parse(raw).map(|value| FieldUpdate::Branch(Some(value)))
                }
            }
            Self::CasteCategory => {
                if raw.trim().is_empty() {
                    Ok(FieldUpdate::CasteCategory(None))
                } else {
                    CasteCategory::parse(raw).map(|value| FieldUpdate::CasteCategory(Some(value)))
                }
            }
        }
    }
}

impl std::fmt::Display for DraftField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    FullName(String),
    PhoneNumber(String),
    Branch(Option<Branch>),
    PinNumber(String),
    CasteCategory(Option<CasteCategory>),
}

impl FieldUpdate {
    pub fn field(&self) -> DraftField {
        match self {
            Self::FullName(_) => DraftField::FullName,
            Self::PhoneNumber(_) => DraftField::PhoneNumber,
            Self::Branch(_) => DraftField::Branch,
            Self::PinNumber(_) => DraftField::PinNumber,
            Self::CasteCategory(_) => DraftField::CasteCategory,
        }
    }
}
