//! Unit kind listing command.

use clap::Args;
use patchwire_registry::{UnitCategory, UnitRegistry};

#[derive(Args)]
pub struct KindsArgs {
    /// Show only kinds in this category (e.g. "oscillator", "midi")
    #[arg(short, long)]
    category: Option<String>,
}

const CATEGORIES: [UnitCategory; 7] = [
    UnitCategory::Oscillator,
    UnitCategory::Envelope,
    UnitCategory::Math,
    UnitCategory::TimeBased,
    UnitCategory::Random,
    UnitCategory::Control,
    UnitCategory::Midi,
];

pub fn run(args: KindsArgs) -> anyhow::Result<()> {
    let registry = UnitRegistry::new();
    let inputs = registry.kind_inputs();

    let categories: Vec<UnitCategory> = match &args.category {
        Some(filter) => {
            let filter = filter.to_lowercase();
            let matched: Vec<_> = CATEGORIES
                .into_iter()
                .filter(|c| c.name().to_lowercase().contains(&filter))
                .collect();
            if matched.is_empty() {
                anyhow::bail!("Unknown category: {}", filter);
            }
            matched
        }
        None => CATEGORIES.to_vec(),
    };

    println!("Unit Kinds");
    println!("==========\n");

    for category in categories {
        let units = registry.units_in_category(category);
        if units.is_empty() {
            continue;
        }
        println!("{}:", category.name());
        for unit in units {
            let slots = inputs
                .get(unit.id)
                .filter(|s| !s.is_empty())
                .map_or_else(|| "-".to_owned(), |s| s.join(", "));
            println!("  {:<12} {}", unit.id, unit.description);
            println!("  {:<12} inputs: {}", "", slots);
        }
        println!();
    }

    println!("The built-in object \"engine\" accepts input: in");
    Ok(())
}
