use loophero_core::observer::MONITORED_APPS;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&MONITORED_APPS)?);
        return Ok(());
    }
    for rule in MONITORED_APPS.iter() {
        println!("{:<16} {:<28} {}", rule.label, rule.app_id, rule.element_kind);
    }
    Ok(())
}
