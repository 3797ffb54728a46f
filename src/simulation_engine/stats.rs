//! Derived percentages shared by the player and batch statistics panels.

/// `wins / total * 100`, two decimals. Defined as `"0.00"` when `total` is 0.
pub fn calculate_percentage(wins: u64, total: u64) -> String {
    if total == 0 {
        return "0.00".to_string();
    }
    format!("{:.2}", wins as f64 / total as f64 * 100.0)
}

/// Win percentage from separate win and loss tallies.
pub fn win_rate(wins: u64, losses: u64) -> String {
    calculate_percentage(wins, wins + losses)
}
