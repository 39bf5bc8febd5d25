//! gui/update/export.rs
//! PDF export: save dialog, then render + write off-thread.

use std::path::PathBuf;

use chrono::Local;
use iced::Task;

use super::super::state::{Message, MusicScanPro};
use super::util::spawn_blocking;
use crate::core::report;

pub(crate) fn export_pdf(state: &mut MusicScanPro) -> Task<Message> {
    // Exporting is only offered once an analysis exists.
    if state.comparison.is_none() || state.exporting {
        return Task::none();
    }

    let file_name = report::file_name(Local::now().date_naive());
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .set_title("Save report")
                .set_file_name(file_name)
                .add_filter("PDF", &["pdf"])
                .save_file()
                .await
                .map(|h| h.path().to_path_buf())
        },
        Message::ExportPathChosen,
    )
}

pub(crate) fn export_path_chosen(
    state: &mut MusicScanPro,
    path: Option<PathBuf>,
) -> Task<Message> {
    let Some(path) = path else {
        return Task::none();
    };

    state.exporting = true;
    state.notice = None;

    let tracks = state.tracks.clone();
    let comparison = state.comparison.clone();
    let today = Local::now().date_naive();

    Task::perform(
        spawn_blocking(move || {
            report::export(&path, &tracks, comparison.as_ref(), today)
                .map_err(|e| e.to_string())?;
            Ok(path)
        }),
        Message::ExportFinished,
    )
}

pub(crate) fn export_finished(
    state: &mut MusicScanPro,
    result: Result<PathBuf, String>,
) -> Task<Message> {
    state.exporting = false;

    match result {
        Ok(path) => state.notice = Some(format!("Report saved to {}", path.display())),
        Err(e) => state.error = Some(e),
    }
    Task::none()
}
