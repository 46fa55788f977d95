use seqlink_codec::Mode;

use crate::commands::check::{LinkCheck, LinkRejection};

pub fn print_rejected_link(line: usize, rejection: &LinkRejection) {
    println!("✗ line {line}: {rejection}");
}

pub fn print_check_summary(checks: &[LinkCheck]) {
    let count = |mode: Mode| {
        checks
            .iter()
            .filter(|c| matches!(c.result, Ok(m) if m == mode))
            .count()
    };
    let invalid = checks.iter().filter(|c| c.result.is_err()).count();

    println!("\n📋 Link Summary");
    println!("  • Checked: {}", checks.len());
    for mode in Mode::ALL {
        println!("  • {mode}: {}", count(mode));
    }
    println!("  • invalid: {invalid}");

    if invalid == 0 {
        println!("\n✓ All links are valid");
    }
}
