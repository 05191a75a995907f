use crate::error::{RegistroError, Result};
use csv::{ReaderBuilder, StringRecord};
use shared::models::{Participant, ParticipantExt, Person};
use std::fs::File;
use std::io::{BufReader, Read};
use tracing::{info, warn};

// French spreadsheet conventions: JJ/MM/AAAA dates, status labels.
pub mod french_format {
    use anyhow::{anyhow, Result};
    use shared::date::{self, Date};
    use shared::models::ParticipantStatus;

    /// An empty cell is an unset date; anything else must be JJ/MM/AAAA.
    pub fn parse_date(s: &str) -> Result<Date> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Date::ZERO);
        }
        date::parse(s).ok_or_else(|| anyhow!("Failed to parse date '{}'", s))
    }

    pub fn parse_status(s: &str) -> Result<ParticipantStatus> {
        let status = match s.trim().to_lowercase().as_str() {
            "" | "a statuer" | "à statuer" => ParticipantStatus::Pending,
            "profil invalide" => ParticipantStatus::InvalidProfile,
            "camp complet" => ParticipantStatus::CampFull,
            "en attente" | "en attente de réponse" => ParticipantStatus::AwaitingAnswer,
            "inscrit" => ParticipantStatus::Enrolled,
            "refusé" | "refuse" => ParticipantStatus::Refused,
            other => return Err(anyhow!("Unknown status '{}'", other)),
        };
        Ok(status)
    }

}

pub struct ParticipantCsvParser;

impl ParticipantCsvParser {
    // CSV Header: Nom;Prenom;DateNaissance;Statut;Telephone
    // Example Row: DUPONT;jean;05/06/2010;Inscrit;06 12 34 56 78
    pub fn load_participants_from_csv(file_path: &str, camp_id: i64) -> Result<Vec<ParticipantExt>> {
        let file = File::open(file_path)?;
        let participants = Self::read_participants(BufReader::new(file), camp_id)?;
        info!(path = file_path, count = participants.len(), "Loaded participants");
        Ok(participants)
    }

    pub fn read_participants<R: Read>(reader: R, camp_id: i64) -> Result<Vec<ParticipantExt>> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let mut participants = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result?;

            let last_name = Self::required(&record, &headers, "Nom", line)?;
            let first_name = Self::required(&record, &headers, "Prenom", line)?;
            let birth_str = Self::required(&record, &headers, "DateNaissance", line)?;
            let status_str = Self::get_field(&record, &headers, "Statut").unwrap_or("");
            let phone = Self::get_field(&record, &headers, "Telephone").unwrap_or("");

            let birth_date = french_format::parse_date(birth_str)
                .map_err(|e| Self::format_error(line, format!("'DateNaissance': {e}")))?;
            let status = french_format::parse_status(status_str)
                .map_err(|e| Self::format_error(line, format!("'Statut': {e}")))?;
            if birth_date.is_zero() {
                warn!(line, "Participant without birth date");
            }

            let id = idx as i64 + 1;
            participants.push(ParticipantExt {
                participant: Participant { id, camp_id, person_id: id, status },
                person: Person {
                    id,
                    last_name: last_name.trim().to_uppercase(),
                    first_name: shared::format::format_first_name(first_name),
                    birth_date,
                    phones: if phone.trim().is_empty() { vec![] } else { vec![phone.trim().to_string()] },
                },
            });
        }
        Ok(participants)
    }

    fn required<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str, line: usize) -> Result<&'a str> {
        Self::get_field(record, headers, name)
            .ok_or_else(|| Self::format_error(line, format!("missing '{name}' field")))
    }

    fn format_error(line: usize, message: String) -> RegistroError {
        RegistroError::CsvDataFormatError { line, message }
    }

    // Fields are looked up by header name, so columns may come in any order.
    fn get_field<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str) -> Option<&'a str> {
        headers
            .iter()
            .position(|header| header.trim() == name)
            .and_then(|pos| record.get(pos))
    }
}
