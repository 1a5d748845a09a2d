//! `campuschat rules`: list the static rule table.

use campuschat_router::RuleTable;

pub fn run() {
    let table = RuleTable::builtin();

    println!("Rules ({}), first match wins:", table.len());
    for (position, rule) in table.iter().enumerate() {
        let terms = rule.predicate.terms().join(", ");
        println!("  {:>2}. {:<18} {}", position + 1, rule.name, terms);
    }

    let shadowed = table.shadowed_terms();
    if shadowed.is_empty() {
        return;
    }

    println!();
    println!("Shadowed keywords ({}):", shadowed.len());
    for shadowing in shadowed {
        println!("  - {shadowing}");
    }
}
