use crate::date::Date;
use crate::money::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type PersonId = i64;
pub type ParticipantId = i64;
pub type CampId = i64;
pub type GroupId = i64;
pub type DossierId = i64;
pub type EventId = i64;
pub type PaymentId = i64;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub last_name: String,
    pub first_name: String,
    pub birth_date: Date,
    #[serde(default)]
    pub phones: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantStatus {
    #[default]
    Pending,
    InvalidProfile,
    CampFull,
    AwaitingAnswer,
    Enrolled,
    Refused,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub camp_id: CampId,
    pub person_id: PersonId,
    pub status: ParticipantStatus,
}

/// A participant with the person it refers to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantExt {
    pub participant: Participant,
    pub person: Person,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Camp {
    pub id: CampId,
    pub name: String,
    pub place: String,
    pub start: Date,
    /// Number of days, first and last included.
    pub days: u32,
    pub open: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampExt {
    pub camp: Camp,
    /// Set once the camp has been over for at least a day.
    pub is_terminated: bool,
}

/// Age group of a camp. `end` is the inclusive upper bound on birth dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgeGroup {
    pub id: GroupId,
    pub camp_id: CampId,
    pub name: String,
    pub end: Date,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    Family,
    Backoffice,
    Director,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub origin: Actor,
    /// Camp of the sending director, only set for `Actor::Director`.
    #[serde(default)]
    pub origin_camp: Option<CampId>,
    /// Camps whose directors have already read the message.
    #[serde(default)]
    pub seen_by_camps: Vec<CampId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content")]
pub enum EventContent {
    Registration,
    Validation { camp: Option<CampId> },
    Message(Message),
    Deleted,
    Other(String),
}

/// One entry of a dossier timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub dossier_id: DossierId,
    pub created: DateTime<Utc>,
    pub content: EventContent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub dossier_id: DossierId,
    #[serde(default)]
    pub is_deposit: bool,
    #[serde(default)]
    pub is_refund: bool,
    pub amount: Amount,
    pub payer: String,
    pub date: Date,
    /// Cheque number or bank
    #[serde(default)]
    pub label: String,
}

impl Payment {
    /// Signed amount: refunds count negatively.
    pub fn signed_amount(&self) -> Amount {
        if self.is_refund {
            self.amount.negated()
        } else {
            self.amount
        }
    }

    pub fn description(&self) -> String {
        let date = crate::format::format_birth_date(self.date);
        if self.is_deposit {
            format!("Acompte de {} au {}", self.payer, date)
        } else if self.is_refund {
            format!("Remboursement au {}", date)
        } else {
            format!("Paiement de {} au {}", self.payer, date)
        }
    }
}
