//! Card display for lemur records.

use std::io::{self, Write};

use lemurkeeper_core::{CATEGORY_ALL, FilterCriteria, Lemur};

const LABEL_WIDTH: usize = 8;

/// Print one card per lemur followed by a summary line.
pub fn print_cards<W: Write>(out: &mut W, lemurs: &[&Lemur], total: usize) -> io::Result<()> {
    if lemurs.is_empty() {
        if total == 0 {
            writeln!(out, "No lemurs loaded.")?;
        } else {
            writeln!(out, "No lemurs match the current filters.")?;
        }
        return Ok(());
    }

    for lemur in lemurs {
        print_card(out, lemur)?;
    }
    writeln!(out, "showing {} of {} lemurs", lemurs.len(), total)
}

/// Print a single lemur as a vertical card.
pub fn print_card<W: Write>(out: &mut W, lemur: &Lemur) -> io::Result<()> {
    writeln!(out, "=== {} ===", lemur.name.as_deref().unwrap_or("(unnamed)"))?;
    print_row(out, "id", &lemur.id.to_string())?;
    if let Some(sex) = &lemur.sex {
        print_row(out, "sex", sex)?;
    }
    if let Some(src) = &lemur.src {
        print_row(out, "image", src)?;
    }
    writeln!(out)
}

/// Print the active filters, e.g. `search: "ring"  category: All`.
pub fn print_filters<W: Write>(out: &mut W, criteria: &FilterCriteria) -> io::Result<()> {
    let category = criteria.category();
    let marker = if category == CATEGORY_ALL { "" } else { " (filtered)" };
    writeln!(
        out,
        "search: {:?}  category: {}{}",
        criteria.query(),
        category,
        marker
    )
}

fn print_row<W: Write>(out: &mut W, label: &str, value: &str) -> io::Result<()> {
    writeln!(out, "  {:<width$} {}", label, value, width = LABEL_WIDTH)
}
