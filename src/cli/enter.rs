use otpbox::error::Result;
use otpbox::field::FieldKind;
use otpbox::form::Form;
use otpbox::group::{OtpGroup, SinkTarget, Target};
use otpbox::settings::load_settings;
use otpbox::tui;

use super::{with_overrides, CONTAINER_ID, SINK_ID};

pub fn run(cells: Option<usize>, empty_char: Option<char>, strict: bool, mask: bool) -> Result<()> {
    let settings = with_overrides(load_settings(), cells, empty_char, strict);
    let mask = mask || settings.mask;
    let kind = if mask {
        FieldKind::Password
    } else {
        FieldKind::Text
    };
    let form = Form::single(CONTAINER_ID, kind, settings.cells, Some(SINK_ID));
    let mut group = OtpGroup::bind(
        &form,
        Target::Selector(format!("#{CONTAINER_ID}")),
        Some(SinkTarget::Selector(format!("#{SINK_ID}"))),
        settings.otp_config(),
    );
    if group.is_empty() {
        println!("Nothing to enter: zero boxes configured.");
        return Ok(());
    }

    let title = format!("Enter your {}-digit code", group.len());
    match tui::run_entry(&mut group, &title, mask)? {
        Some(code) => println!("{code}"),
        None => eprintln!("Cancelled."),
    }
    Ok(())
}
