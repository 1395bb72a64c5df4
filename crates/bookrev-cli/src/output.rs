use std::io::Write;

use bookrev_core::ParseResult;
use bookrev_ingest::{PipelineStats, VenueProfile};
use bookrev_parsing::Verdict;
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the outcome of a single-title parse.
pub fn print_parse(
    w: &mut dyn Write,
    title: &str,
    result: Option<&ParseResult>,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w, "Input:   {}", title)?;
    let Some(r) = result else {
        if color.enabled() {
            writeln!(w, "Result:  {}", "NO PARSE".red())?;
        } else {
            writeln!(w, "Result:  NO PARSE")?;
        }
        return Ok(());
    };

    if color.enabled() {
        writeln!(w, "Title:   {}", r.book_title.bold())?;
    } else {
        writeln!(w, "Title:   {}", r.book_title)?;
    }

    if r.has_author() {
        writeln!(w, "Given:   {}", r.author_given)?;
        writeln!(w, "Family:  {}", r.author_family)?;
    } else if color.enabled() {
        writeln!(w, "Author:  {}", "needs lookup".yellow())?;
    } else {
        writeln!(w, "Author:  needs lookup")?;
    }

    let mut flags = Vec::new();
    if r.is_edited_volume {
        flags.push("edited volume");
    }
    if r.has_multiple_authors {
        flags.push("multiple authors");
    }
    if !flags.is_empty() {
        writeln!(w, "Flags:   {}", flags.join(", "))?;
    }

    if color.enabled() {
        writeln!(w, "{}", format!("Format:  {}", r.matched_format).dimmed())?;
    } else {
        writeln!(w, "Format:  {}", r.matched_format)?;
    }
    Ok(())
}

/// Print a classifier verdict.
pub fn print_verdict(w: &mut dyn Write, verdict: Verdict, color: ColorMode) -> std::io::Result<()> {
    let label = if verdict.is_review() {
        "REVIEW"
    } else {
        "NOT A REVIEW"
    };
    if color.enabled() {
        if verdict.is_review() {
            writeln!(w, "{} ({})", label.green(), verdict.as_str())
        } else {
            writeln!(w, "{} ({})", label.red(), verdict.as_str())
        }
    } else {
        writeln!(w, "{} ({})", label, verdict.as_str())
    }
}

/// Print the end-of-run summary.
pub fn print_summary(
    w: &mut dyn Write,
    stats: &PipelineStats,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    if color.enabled() {
        writeln!(w, "{}", "SUMMARY".bold())?;
    } else {
        writeln!(w, "SUMMARY")?;
    }
    writeln!(w, "  Items seen:          {}", stats.seen)?;

    let accepted = format!("{}", stats.accepted);
    if color.enabled() {
        writeln!(w, "  Reviews accepted:    {}", accepted.green())?;
    } else {
        writeln!(w, "  Reviews accepted:    {}", accepted)?;
    }
    writeln!(
        w,
        "  Authors via lookup:  {} of {} queried",
        stats.lookup_recovered, stats.looked_up
    )?;
    if stats.alternate_parsed > 0 {
        writeln!(w, "  From alternate title: {}", stats.alternate_parsed)?;
    }
    if stats.missing_author > 0 {
        let missing = format!("{}", stats.missing_author);
        if color.enabled() {
            writeln!(w, "  Without author:      {}", missing.yellow())?;
        } else {
            writeln!(w, "  Without author:      {}", missing)?;
        }
    }

    let skipped = format!(
        "(Skipped {} non-reviews, {} unparsed, {} self-authored)",
        stats.not_a_review, stats.unparsed, stats.self_authored
    );
    if color.enabled() {
        writeln!(w, "{}", skipped.dimmed())?;
    } else {
        writeln!(w, "{}", skipped)?;
    }
    Ok(())
}

/// Print the configured venue table.
pub fn print_venues<'a>(
    w: &mut dyn Write,
    venues: impl Iterator<Item = (&'a str, VenueProfile)>,
    color: ColorMode,
) -> std::io::Result<()> {
    for (name, profile) in venues {
        let mode = if profile.all_reviews {
            format!("{} (all reviews)", profile.strictness)
        } else {
            profile.strictness.to_string()
        };
        if color.enabled() {
            writeln!(w, "{:<50} {}", name, mode.cyan())?;
        } else {
            writeln!(w, "{:<50} {}", name, mode)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookrev_core::{MatchedFormat, Strictness};

    fn render(f: impl FnOnce(&mut dyn Write) -> std::io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_print_parse_plain() {
        let r = ParseResult::authored("Essays on Virtue", "John", "Smith", MatchedFormat::EditorsAuthorTitle)
            .edited(true);
        let out = render(|w| print_parse(w, "Smith, John, eds. Essays on Virtue", Some(&r), ColorMode(false)));
        assert!(out.contains("Title:   Essays on Virtue"));
        assert!(out.contains("Family:  Smith"));
        assert!(out.contains("Flags:   edited volume"));
        assert!(out.contains("Format:  editors_author_title"));
    }

    #[test]
    fn test_print_parse_none_and_lookup() {
        let out = render(|w| print_parse(w, "Book Review", None, ColorMode(false)));
        assert!(out.contains("NO PARSE"));

        let r = ParseResult::title_only("Plato", MatchedFormat::ItalicTitleOnly);
        let out = render(|w| print_parse(w, "<i>Plato</i>", Some(&r), ColorMode(false)));
        assert!(out.contains("Author:  needs lookup"));
    }

    #[test]
    fn test_print_verdict() {
        let out = render(|w| print_verdict(w, Verdict::Excluded, ColorMode(false)));
        assert_eq!(out, "NOT A REVIEW (excluded)\n");
    }

    #[test]
    fn test_print_summary_counts() {
        let stats = PipelineStats {
            seen: 5,
            accepted: 3,
            looked_up: 2,
            lookup_recovered: 1,
            missing_author: 1,
            not_a_review: 2,
            ..Default::default()
        };
        let out = render(|w| print_summary(w, &stats, ColorMode(false)));
        assert!(out.contains("Reviews accepted:    3"));
        assert!(out.contains("1 of 2 queried"));
        assert!(out.contains("Without author:      1"));
        assert!(out.contains("(Skipped 2 non-reviews, 0 unparsed, 0 self-authored)"));
    }

    #[test]
    fn test_print_venues() {
        let venues = vec![
            ("Ethics", VenueProfile::new(Strictness::ItalicOnly, false)),
            ("Philosophy in Review", VenueProfile::new(Strictness::Lenient, true)),
        ];
        let out = render(|w| print_venues(w, venues.into_iter(), ColorMode(false)));
        assert!(out.contains("italic_only"));
        assert!(out.contains("lenient (all reviews)"));
    }
}
