//! Options Dashboard CLI
//!
//! Text rendering of the dashboard.
//!
//! Usage: `dashboard_cli [TICKER] [EXPIRY] [SORT_COLUMN] [asc|desc]`
//! Without an expiry the nearest offered one is used.

use chrono::NaiveDate;
use options_dashboard::prelude::*;

fn print_table(title: &str, table: &DisplayTable) {
    println!("\n{}", title);

    let headers = table.headers();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            table
                .rows
                .iter()
                .map(|r| r[i].len())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:>width$}", c, width = w))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("  {}", line(headers.clone()));
    for row in &table.rows {
        println!("  {}", line(row.iter().map(String::as_str).collect()));
    }
}

fn run(args: &[String]) -> DashboardResult<()> {
    let config = DashboardConfig::load()?;
    let client = YahooClient::with_config(&config.provider)?;
    let mut session = DashboardSession::new(client, &config);

    let ticker = args.first().map(String::as_str).unwrap_or("SPY");
    let expiries = session.expirations(ticker)?;

    let expiry = match args.get(1) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|e| DashboardError::data(format!("Bad expiry '{}': {}", raw, e)))?,
        None => *expiries
            .first()
            .ok_or_else(|| DashboardError::data(format!("No expiries offered for {}", ticker)))?,
    };

    let column = match args.get(2) {
        Some(name) => Column::from_display_name(name)?,
        None => Column::Strike,
    };
    let order = SortOrder::from_ascending(!matches!(args.get(3).map(String::as_str), Some("desc")));
    let sort = TableSort { column, order };

    let request = ViewRequest::new(ticker, expiry)
        .with_calls_sort(sort)
        .with_puts_sort(sort);
    let view = session.view_with_offered(&request, &expiries)?;

    println!("Summary for {} - Expiry: {}", view.ticker(), view.expiry());
    println!("Last pulled: {}", view.last_pulled());
    println!("==========================================");
    println!(
        "Calls  Open Interest: {:>12}  Volume: {:>12}",
        view.summary.calls_oi_display(),
        view.summary.calls_volume_display()
    );
    println!(
        "Puts   Open Interest: {:>12}  Volume: {:>12}",
        view.summary.puts_oi_display(),
        view.summary.puts_volume_display()
    );

    print_table("Calls Options Chain", &view.calls);
    print_table("Puts Options Chain", &view.puts);

    println!("\nData provided by Yahoo Finance");
    Ok(())
}

fn main() {
    options_dashboard::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
