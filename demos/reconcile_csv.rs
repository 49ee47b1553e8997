//! Basic reconciliation example: two CSV exports in, four outcome classes out

use recon_core::export::{mismatches_to_csv, records_to_csv};
use recon_core::ingest::parse_csv_records;
use recon_core::utils::MemorySource;
use recon_core::{ReconciliationPipeline, RecordSide};

const INTERNAL_CSV: &str = "\
transaction_reference,amount,status,date,counterparty,currency
TXN-1001,2500.00,SUCCESS,2024-01-15,Acme Ltd,KES
TXN-1002,180.25,SUCCESS,2024-01-15,Globex,KES
TXN-1003,99.99,PENDING,2024-01-16,Initech,KES
TXN-1004,4000.00,SUCCESS,2024-01-16,Umbrella,KES
";

const PROVIDER_CSV: &str = "\
transaction_reference,amount,status,date,counterparty,currency
TXN-1001,2500.00,SUCCESS,2024-01-15,Acme Ltd,KES
TXN-1002,180.45,SUCCESS,2024-01-15,Globex,KES
TXN-1003,99.99,SETTLED,2024-01-16,Initech,KES
TXN-9001,710.00,SUCCESS,2024-01-17,Hooli,KES
";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("🏦 Recon Core - Basic Reconciliation Example\n");

    // 1. Ingest both sides
    println!("📥 Ingesting CSV exports...");
    let internal = parse_csv_records("internal.csv", RecordSide::Internal, INTERNAL_CSV)?;
    let provider = parse_csv_records("provider.csv", RecordSide::Provider, PROVIDER_CSV)?;
    println!(
        "  ✓ {} internal transactions, {} provider transactions\n",
        internal.records.len(),
        provider.records.len()
    );

    // 2. Run the pipeline: validation gate, then the engine
    println!("🔍 Running reconciliation...");
    let pipeline = ReconciliationPipeline::new();
    let result = pipeline
        .run(&MemorySource::new(internal), &MemorySource::new(provider))
        .await?;

    let summary = result.summary();
    println!("  ✓ Matched:        {}", summary.matched);
    println!("  ⚠ Mismatched:     {}", summary.mismatched);
    println!("  ⚠ Internal only:  {}", summary.internal_only);
    println!("  ✗ Provider only:  {}\n", summary.provider_only);

    // 3. Show the per-field differences for mismatched pairs
    for mismatch in &result.mismatched {
        println!(
            "  {} differs: {}",
            mismatch.internal.transaction_reference,
            mismatch.differences.join("; ")
        );
    }
    println!();

    // 4. Export the exception lists back to CSV
    println!("📤 Exporting results...");
    let mismatched_csv = mismatches_to_csv(&result.mismatched)?;
    let internal_only_csv = records_to_csv(&result.internal_only)?;
    println!("--- mismatched-transactions.csv ---\n{mismatched_csv}");
    println!("--- internal-only-transactions.csv ---\n{internal_only_csv}");

    Ok(())
}
