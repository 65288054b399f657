/// Progress bar construction shared by long-running loops
use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar counting `len` items of `unit`, labelled with `message`.
pub fn progress_bar(len: u64, unit: &str, message: &'static str) -> ProgressBar {
    let template = format!("[{{bar:40.green/blue}}] {{pos}}/{{len}} {unit} ({{percent}}%) {{msg}}");
    let style = ProgressStyle::default_bar()
        .template(&template)
        .map(|style| style.progress_chars("▉▊▋▌▍▎▏ "))
        .unwrap_or_else(|_| ProgressStyle::default_bar());

    let pb = ProgressBar::new(len);
    pb.set_style(style);
    pb.set_message(message);
    pb
}
