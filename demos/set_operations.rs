//! Set operations demo.
//!
//! Run with: `REGEXSOLVER_API_TOKEN=your-token cargo run --example set_operations`

use colored::Colorize;
use regexsolver::{ClientBuilder, Term, SDK_VERSION};

fn header(text: &str) {
    println!();
    println!("{}", format!(" {} ", text).on_blue().bold());
}

fn info(label: &str, value: &str) {
    println!("  {}: {}", label.dimmed(), value);
}

#[tokio::main]
async fn main() -> Result<(), regexsolver::Error> {
    let client = ClientBuilder::from_env()?.build()?;

    header("Configuration");
    info("SDK Version", SDK_VERSION);
    info("Base URL", client.base_url());

    let term1 = Term::regex("(abc|de|fg){2,}");
    let term2 = Term::regex("de.*");
    let term3 = Term::regex(".*abc");

    header("Intersection");
    let intersection = term1
        .intersection(&client, &[term2.clone(), term3.clone()])
        .await?;
    info("Result", &intersection.to_string());

    header("Details");
    let details = intersection.get_details(&client).await?;
    info("Cardinality", &details.cardinality.to_string());
    info("Length", &details.length.to_string());

    header("Generated strings");
    for s in intersection.generate_strings(&client, 5).await? {
        println!("  {} {}", "▸".green(), s);
    }

    header("Union and subtraction");
    let union = term2.union(&client, &[term3.clone()]).await?;
    info("Union", &union.to_string());
    let difference = term1.subtraction(&client, &term2).await?;
    info("Subtraction", &difference.to_string());

    header("Relations");
    info(
        "Intersection is a subset of term1",
        &intersection.is_subset_of(&client, &term1).await?.to_string(),
    );
    info(
        "term2 is equivalent to term3",
        &term2.is_equivalent_to(&client, &term3).await?.to_string(),
    );

    header("Persistence");
    let stored = difference.serialize_str();
    info("Serialized", &stored);
    match Term::deserialize_str(&stored) {
        Some(restored) => info("Restored", &restored.to_string()),
        None => println!("  {}", "could not restore term".red()),
    }

    Ok(())
}
