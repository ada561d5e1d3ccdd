use colored::*;
use nodematch_config::PipelineStats;
use nodematch_core::Node;
use nodematch_rule_engine::EnhanceOutcome;

/// Print each node with what the pipeline added to it
pub fn print_nodes(before: &[Node], after: &[Node], stats: &PipelineStats) {
    for (old, new) in before.iter().zip(after) {
        if old == new {
            println!("{} {}", "·".bright_black(), new.name.bright_black());
            continue;
        }

        println!("{} {}", "✓".green(), new.name.bold());
        print_changes(old, new);
    }

    println!();
    println!(
        "{} of {} nodes enriched",
        stats.nodes_enriched.to_string().bold(),
        stats.nodes_seen
    );
}

pub fn print_check(before: &Node, after: &Node, outcome: EnhanceOutcome) {
    match outcome {
        EnhanceOutcome::Skipped => println!("{}", "no match".yellow().bold()),
        EnhanceOutcome::Enriched { .. } => {
            println!("{}", "match".green().bold());
            print_changes(before, after);
        }
    }
}

pub fn print_malformed_lines(rules: &str, lines: &[usize]) {
    eprintln!(
        "{} {}",
        "⚠️ ".yellow(),
        "Malformed rule lines, the rules can never match:".yellow().bold()
    );
    let text: Vec<&str> = rules.lines().collect();
    for &line in lines {
        let content = text.get(line - 1).copied().unwrap_or("");
        eprintln!("  {} {:>3}: {}", "✗".red(), line, content.bright_black());
    }
}

fn print_changes(before: &Node, after: &Node) {
    for (key, value) in &after.attributes {
        match before.attributes.get(key) {
            Some(old) if old == value => {}
            Some(old) => println!(
                "    {} {} = {} {}",
                "~".yellow(),
                key.cyan(),
                value,
                format!("(was {})", old).bright_black()
            ),
            None => println!("    {} {} = {}", "+".green(), key.cyan(), value),
        }
    }

    for tag in after.tags.difference(&before.tags) {
        println!("    {} #{}", "+".green(), tag.cyan());
    }
}
