use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};

use crate::error::Result;
use crate::models::application::Application;
use crate::models::job::JobPosting;

pub struct ExportService;

impl ExportService {
    /// Render the applications received for one posting as a styled XLSX
    /// workbook for offline review.
    pub fn applications_workbook(
        job: &JobPosting,
        applications: &[Application],
    ) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Applications")?;

        let header_bg = Color::RGB(0x0F172A);
        let border_color = Color::RGB(0xE2E8F0);
        let alt_row = Color::RGB(0xF8FAFC);

        let columns = [
            ("№", 6.0),
            ("Candidate", 28.0),
            ("Email", 30.0),
            ("Mobile", 18.0),
            ("Primary Skill", 20.0),
            ("Secondary Skills", 30.0),
            ("Experience", 14.0),
            ("Current Company", 24.0),
            ("Current Location", 20.0),
            ("Preferred Location", 20.0),
            ("Current CTC", 14.0),
            ("Expected CTC", 14.0),
            ("Notice Period", 14.0),
            ("Source", 14.0),
            ("Status", 14.0),
            ("Submitted", 20.0),
        ];

        for (i, (_, width)) in columns.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }

        let title_format = Format::new().set_bold().set_font_size(13);
        worksheet.write_string_with_format(
            0,
            0,
            &format!("Applications — {}", job.job_title),
            &title_format,
        )?;

        let header_format = Format::new()
            .set_bold()
            .set_background_color(header_bg)
            .set_font_color(Color::White)
            .set_align(FormatAlign::Center)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);
        for (i, (name, _)) in columns.iter().enumerate() {
            worksheet.write_string_with_format(2, i as u16, *name, &header_format)?;
        }

        let base_cell = Format::new()
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);
        let alt_cell = Format::new()
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color)
            .set_background_color(alt_row);

        for (i, application) in applications.iter().enumerate() {
            let row = 3 + i as u32;
            let format = if i % 2 == 0 { &base_cell } else { &alt_cell };
            let data = &application.applicant_data.0;

            let cells: [String; 16] = [
                (i + 1).to_string(),
                data.candidate_name.clone(),
                application.email.clone(),
                application.mobile.clone(),
                data.primary_skill.clone(),
                data.secondary_skills.join(", "),
                data.total_experience.clone(),
                data.current_company.clone().unwrap_or_default(),
                data.current_location.clone().unwrap_or_default(),
                data.preferred_location.clone().unwrap_or_default(),
                data.current_ctc.clone().unwrap_or_default(),
                data.expected_ctc.clone().unwrap_or_default(),
                data.notice_period.clone().unwrap_or_default(),
                data.source.clone().unwrap_or_default(),
                application.application_status.clone(),
                application
                    .submitted_at
                    .format("%Y-%m-%d %H:%M UTC")
                    .to_string(),
            ];
            for (col, value) in cells.iter().enumerate() {
                worksheet.write_string_with_format(row, col as u16, value, format)?;
            }
        }

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}
