//! Loading and saving species dictionaries.
//!
//! A species file is either a bare JSON dictionary (`name -> record`) or a text
//! document where the dictionary follows a `SPECIES DATA` header line. A section runs
//! until the next known header (`SPECIES DATA`, `SUBSTANCES`, `END` and their variants)
//! or the end of file. An optional `SUBSTANCES` section lists the species to pick from
//! the dictionary, one or several per line.
use crate::Properties::SpecieRecord::{self, SpeciesDictionary};
use crate::Properties::props_api::{PropsError, PropsResult, RecordIO};
use log::{error, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

const DATA_HEADERS: [&str; 3] = ["SPECIES DATA", "SPECIE DATA", "SPECIES"];
const LIST_HEADERS: [&str; 2] = ["SUBSTANCES", "SUBSTANCES LIST"];
const END_MARKER: &str = "END";

pub struct SpeciesFile {
    pub file_name: String,
}

impl SpeciesFile {
    pub fn new(file_name: String) -> Self {
        SpeciesFile { file_name }
    }
    pub fn load(&self) -> PropsResult<SpeciesDictionary> {
        load_species_from_file(&self.file_name)
    }
    pub fn load_substance_list(&self) -> PropsResult<Vec<String>> {
        load_substance_list(&self.file_name)
    }
    pub fn save(&self, dictionary: &SpeciesDictionary) -> PropsResult<()> {
        save_species_to_file(&self.file_name, dictionary)
    }
}

fn read_lines(file_name: &str) -> PropsResult<Vec<String>> {
    let path = Path::new(file_name);
    if !path.exists() {
        error!("File '{}' does not exist", file_name);
        return Err(PropsError::Io(std::io::Error::new(
            ErrorKind::NotFound,
            format!("File '{}' does not exist", file_name),
        )));
    }
    let reader = BufReader::new(File::open(path)?);
    Ok(reader.lines().collect::<Result<Vec<String>, _>>()?)
}

/// species names such as `AR` or `HE` are all capitals, so only known headers end a section
fn is_header(line: &str) -> bool {
    let key = line.trim().to_uppercase();
    key == END_MARKER
        || DATA_HEADERS.contains(&key.as_str())
        || LIST_HEADERS.contains(&key.as_str())
}

/// line range of the section following one of `headers`
fn find_section(lines: &[String], headers: &[&str]) -> Option<(usize, usize)> {
    let start = lines
        .iter()
        .position(|line| headers.contains(&line.trim().to_uppercase().as_str()))?
        + 1;
    let end = lines[start..]
        .iter()
        .position(|line| is_header(line))
        .map_or(lines.len(), |i| start + i);
    Some((start, end))
}

/// Parses a species dictionary from a file. Parse errors are logged with the
/// offending line of the file.
pub fn load_species_from_file(file_name: &str) -> PropsResult<SpeciesDictionary> {
    let lines = read_lines(file_name)?;
    let (start, end) = find_section(&lines, &DATA_HEADERS).unwrap_or((0, lines.len()));
    let section = lines[start..end].join("\n");

    match SpecieRecord::from_json(&section) {
        Ok(dictionary) => {
            if dictionary.is_empty() {
                warn!("Species dictionary in '{}' is empty", file_name);
            }
            info!(
                "Loaded {} species from file '{}'",
                dictionary.len(),
                file_name
            );
            Ok(dictionary)
        }
        Err(PropsError::SerdeError(e)) => {
            let actual_line = start + e.line().saturating_sub(1);
            error!(
                "Error parsing species data at line {}, column {} (line {} in file '{}'): {}",
                e.line(),
                e.column(),
                actual_line + 1,
                file_name,
                e
            );
            if let Some(problem_line) = lines.get(actual_line) {
                error!("Problematic line: {}", problem_line);
                if e.column() >= 1 && e.column() <= problem_line.len() {
                    error!("{}^", " ".repeat(e.column() - 1));
                }
            }
            Err(PropsError::SerdeError(e))
        }
        Err(e) => Err(e),
    }
}

/// comma or newline separated names under the `SUBSTANCES` header
pub fn load_substance_list(file_name: &str) -> PropsResult<Vec<String>> {
    let lines = read_lines(file_name)?;
    let (start, end) = find_section(&lines, &LIST_HEADERS).ok_or_else(|| PropsError::MissingData {
        name: file_name.to_owned(),
        field: "SUBSTANCES",
    })?;
    let names: Vec<String> = lines[start..end]
        .join(",")
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if names.is_empty() {
        return Err(PropsError::MissingData {
            name: file_name.to_owned(),
            field: "SUBSTANCES",
        });
    }
    Ok(names)
}

/// writes the dictionary as pretty JSON, readable by `load_species_from_file`
pub fn save_species_to_file(file_name: &str, dictionary: &SpeciesDictionary) -> PropsResult<()> {
    let text = SpecieRecord::to_json(dictionary)?;
    std::fs::write(file_name, text).map_err(|e| {
        error!("Failed to write file '{}': {}", file_name, e);
        PropsError::Io(e)
    })?;
    info!("Saved {} species to file '{}'", dictionary.len(), file_name);
    Ok(())
}

/// Builds one model per requested name, in the order given.
pub fn models_from_dictionary<M: RecordIO>(
    dictionary: &SpeciesDictionary,
    names: &[String],
) -> PropsResult<Vec<M>> {
    names
        .iter()
        .map(|name| {
            let record = dictionary.get(name).ok_or_else(|| PropsError::MissingData {
                name: name.clone(),
                field: "species record",
            })?;
            M::from_record(name, record)
        })
        .collect()
}
