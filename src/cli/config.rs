use otpbox::error::Result;
use otpbox::settings::{load_settings, save_settings, settings_path};

pub fn run(
    cells: Option<usize>,
    empty_char: Option<char>,
    strict: bool,
    no_strict: bool,
    mask: bool,
    no_mask: bool,
) -> Result<()> {
    let mut settings = load_settings();
    let changed = cells.is_some() || empty_char.is_some() || strict || no_strict || mask || no_mask;

    if let Some(n) = cells {
        settings.cells = n;
    }
    if let Some(c) = empty_char {
        settings.empty_char = c;
    }
    if strict || no_strict {
        settings.strict = strict;
    }
    if mask || no_mask {
        settings.mask = mask;
    }

    if changed {
        save_settings(&settings)?;
        println!("Saved settings to {}", settings_path().display());
    }
    println!("Cells:       {}", settings.cells);
    println!("Empty char:  {:?}", settings.empty_char);
    println!("Strict:      {}", settings.strict);
    println!("Mask:        {}", settings.mask);
    Ok(())
}
