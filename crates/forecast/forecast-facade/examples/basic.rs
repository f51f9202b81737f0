//! Basic example: train on a few records, forecast, estimate lifetime value
//!
//! Run with: cargo run --example basic -p forecast-facade

use forecast_facade::{
    estimate_lifetime_value, CustomerAggregate, Regressor, SalesForecastModel, SalesRecord,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== sales forecast basic example ===\n");

    let history = vec![
        SalesRecord::new("2024-01-08", 820.0),
        SalesRecord::new("2024-02-12", 870.0),
        SalesRecord::new("2024-03-16", 1010.0),
        SalesRecord::new("2024-04-20", 1090.0),
        SalesRecord::new("2024-05-25", 1180.0),
        SalesRecord::new("2024-06-29", 1240.0),
    ];

    // 1. Training (in-memory artifacts)
    let mut model = SalesForecastModel::in_memory();
    model.train(&history)?;
    if let Some(trained) = model.trained() {
        println!("1. Trained on {} records", history.len());
        println!("   Coefficients: {:?}", trained.regressor().coefficients());
        println!("   Intercept: {:.2}", trained.regressor().intercept());
        println!("   R²: {:.4}", trained.regressor().r_squared());
        println!("   Features: {:?}\n", trained.regressor().n_features());
    }

    // 2. Forecast
    println!("2. Forecast");
    for p in model.forecast(&["2024-07-15", "2024-08-15", "2024-09-15"])? {
        println!(
            "   {}: {:.2} (± {:.2})",
            p.date, p.predicted_amount, p.confidence_interval
        );
    }

    // 3. Lifetime value
    let value = estimate_lifetime_value(&CustomerAggregate {
        average_order_value: 50.0,
        order_frequency: 3.0,
    });
    println!(
        "\n3. Lifetime value: {:.2} (confidence {})",
        value.predicted_lifetime_value, value.confidence
    );

    Ok(())
}
