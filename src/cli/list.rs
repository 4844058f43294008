use anyhow::Result;
use clap::{Args, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Table};

use crate::config::Config;
use crate::inventory::{list_candidates, Category};
use crate::status;

#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Table,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only list this category
    pub category: Option<Category>,

    /// Output format
    #[arg(short, long, default_value = "plain")]
    pub format: OutputFormat,
}

pub fn run(args: ListArgs, config: &Config) -> Result<()> {
    let categories: Vec<Category> = match args.category {
        Some(category) => vec![category],
        None => Category::ALL.to_vec(),
    };

    let mut listings = Vec::new();
    for category in categories {
        match list_candidates(category.dir(config), &config.exclude) {
            Ok(files) => listings.push((category, files)),
            // A single requested category must exist; in the overview a
            // missing directory is only reported.
            Err(err) if args.category.is_none() => status!("{}: {}", category.label(), err),
            Err(err) => return Err(err.into()),
        }
    }

    match args.format {
        OutputFormat::Plain => print_plain(&listings, args.category.is_some()),
        OutputFormat::Table => print_table(&listings),
    }

    Ok(())
}

fn print_plain(listings: &[(Category, Vec<String>)], single: bool) {
    for (category, files) in listings {
        if single {
            for file in files {
                println!("{}", file);
            }
            continue;
        }

        println!("{}:", category.label());
        if files.is_empty() {
            println!("  -");
        }
        for file in files {
            println!("  {}", file);
        }
    }
}

fn print_table(listings: &[(Category, Vec<String>)]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Category", "File"]);

    for (category, files) in listings {
        for file in files {
            table.add_row(vec![category.label(), file.as_str()]);
        }
    }

    println!("{table}");
}
