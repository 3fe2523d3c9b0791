use interest_form::{FieldId, InterestForm, OutputOptions, UiOptions};

fn main() -> anyhow::Result<()> {
    let submitted = InterestForm::new()
        .with_options(UiOptions::default().with_show_pin(true))
        .with_value(FieldId::FirstName, "Josh")
        .with_value(FieldId::LastName, "Kim")
        .with_value(FieldId::Pin, "1234-5678")
        .with_output(OutputOptions::default())
        .run()?;

    eprintln!("submitted PIN ends in {}", &submitted.pin()[12..]);
    Ok(())
}
