use triage_core::AppViewModel;

use crate::platform::console::HELP;

pub fn welcome(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![
        "mail-triage: classify an email and draft a reply".to_string(),
        String::new(),
    ];
    lines.extend(HELP.iter().map(|line| line.to_string()));
    lines.push(String::new());
    // Line input cannot carry modifier keys, so the submit chord is not offered here.
    lines.push(format!("[{}] via :send", view.submit.label));
    lines.push("Drop zone: drag a .txt/.pdf here (:drop) or pick one (:file)".to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::AppState;

    #[test]
    fn welcome_offers_send_command_without_key_chord() {
        let lines = welcome(&AppState::new().view());
        assert!(lines.contains(&"[Analyze] via :send".to_string()));
        assert!(!lines.iter().any(|line| line.contains("Enter")));
    }
}
