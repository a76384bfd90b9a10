use std::path::Path;

use anyhow::Context;
use log::info;
use rust_xlsxwriter::Workbook;

use crate::schema::{EducationEntry, ExperienceEntry, Profile, ProfileData};

pub const DEFAULT_FILENAME: &str = "linkedin_data.xlsx";

/// A record written as one row of its own sheet.
pub trait SheetRow {
    const SHEET_NAME: &'static str;
    const COLUMNS: &'static [&'static str];

    /// Cell values in the order of [`SheetRow::COLUMNS`].
    fn cells(&self) -> Vec<&str>;
}

impl SheetRow for Profile {
    const SHEET_NAME: &'static str = "Profile";
    const COLUMNS: &'static [&'static str] = &["Name", "Location", "Connections", "Headline"];

    fn cells(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.location.as_str(),
            self.connections.as_str(),
            self.headline.as_str(),
        ]
    }
}

impl SheetRow for ExperienceEntry {
    const SHEET_NAME: &'static str = "Experiences";
    const COLUMNS: &'static [&'static str] = &["Company", "Duration", "Location"];

    fn cells(&self) -> Vec<&str> {
        vec![
            self.company.as_str(),
            self.duration.as_str(),
            self.location.as_str(),
        ]
    }
}

impl SheetRow for EducationEntry {
    const SHEET_NAME: &'static str = "Education";
    const COLUMNS: &'static [&'static str] = &["Institution", "Degree", "Duration"];

    fn cells(&self) -> Vec<&str> {
        vec![
            self.institution.as_str(),
            self.degree.as_str(),
            self.duration.as_str(),
        ]
    }
}

/// Writes the three record tables to the sheets `Profile`, `Experiences` and
/// `Education` of a new workbook at `path`, replacing any existing file.
///
/// The workbook is assembled in memory first, so a failure while building it
/// leaves the file system untouched.
pub fn save_to_excel(
    profile: &Profile,
    experiences: &[ExperienceEntry],
    educations: &[EducationEntry],
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let mut workbook = Workbook::new();
    write_sheet(&mut workbook, std::slice::from_ref(profile))?;
    write_sheet(&mut workbook, experiences)?;
    write_sheet(&mut workbook, educations)?;
    let buffer = workbook
        .save_to_buffer()
        .context("Failed to assemble the workbook")?;
    fs_err::write(path, buffer)?;
    info!("Data saved to {}.", path.display());
    Ok(())
}

impl ProfileData {
    pub fn save_to_excel(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        save_to_excel(&self.profile, &self.experiences, &self.educations, path)
    }
}

fn write_sheet<T: SheetRow>(workbook: &mut Workbook, records: &[T]) -> anyhow::Result<()> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(T::SHEET_NAME)?;
    for (col, &header) in (0..).zip(T::COLUMNS) {
        worksheet.write_string(0, col, header)?;
    }
    for (row, record) in (1..).zip(records) {
        for (col, cell) in (0..).zip(record.cells()) {
            worksheet.write_string(row, col, cell)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use calamine::{open_workbook, Reader, Xlsx};

    use crate::schema::{EducationEntry, ExperienceEntry, Profile, ProfileData};

    fn read_sheets(path: &Path) -> Vec<(String, Vec<Vec<String>>)> {
        let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
        workbook
            .sheet_names()
            .into_iter()
            .map(|name| {
                let rows = workbook
                    .worksheet_range(&name)
                    .unwrap()
                    .rows()
                    .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                    .collect();
                (name, rows)
            })
            .collect()
    }

    fn sample() -> ProfileData {
        ProfileData {
            profile: Profile {
                name: "Jane Doe".into(),
                location: "Berlin, Germany".into(),
                connections: "500+".into(),
                headline: "Staff Engineer".into(),
            },
            experiences: vec![
                ExperienceEntry {
                    company: "Acme".into(),
                    duration: "4 yrs".into(),
                    location: "Berlin".into(),
                },
                ExperienceEntry {
                    company: "Initech".into(),
                    duration: "No Duration Found".into(),
                    location: "Remote".into(),
                },
            ],
            educations: vec![EducationEntry {
                institution: "TU Berlin".into(),
                degree: "MSc".into(),
                duration: "2012 - 2014".into(),
            }],
        }
    }

    #[test]
    fn sheets_read_back_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linkedin_data.xlsx");
        sample().save_to_excel(&path).unwrap();

        let sheets = read_sheets(&path);
        let names: Vec<_> = sheets.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["Profile", "Experiences", "Education"]);
        assert_eq!(
            sheets[0].1,
            [
                ["Name", "Location", "Connections", "Headline"],
                ["Jane Doe", "Berlin, Germany", "500+", "Staff Engineer"],
            ]
        );
        assert_eq!(
            sheets[1].1,
            [
                ["Company", "Duration", "Location"],
                ["Acme", "4 yrs", "Berlin"],
                ["Initech", "No Duration Found", "Remote"],
            ]
        );
        assert_eq!(
            sheets[2].1,
            [
                ["Institution", "Degree", "Duration"],
                ["TU Berlin", "MSc", "2012 - 2014"],
            ]
        );
    }

    #[test]
    fn empty_lists_keep_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let data = ProfileData {
            experiences: vec![],
            educations: vec![],
            ..sample()
        };
        data.save_to_excel(&path).unwrap();

        let sheets = read_sheets(&path);
        assert_eq!(sheets[1].1, [["Company", "Duration", "Location"]]);
        assert_eq!(sheets[2].1, [["Institution", "Degree", "Duration"]]);
    }

    #[test]
    fn existing_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        fs_err::write(&path, "not a workbook").unwrap();
        sample().save_to_excel(&path).unwrap();
        assert_eq!(read_sheets(&path)[1].1.len(), 3);
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.xlsx");
        assert!(sample().save_to_excel(&path).is_err());
        assert!(!path.exists());
    }
}
