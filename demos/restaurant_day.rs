//! A day in the restaurant: seed the chart, post events, run reports

use bigdecimal::BigDecimal;
use pos_accounting::utils::MemoryStorage;
use pos_accounting::{
    ChartOfAccounts, InventoryMovement, MovementReference, MovementType, Order, OrderStatus,
    Poster, Reports,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 POS Accounting - Restaurant Day Example\n");

    let storage = MemoryStorage::new();

    // 1. Set up the chart of accounts
    println!("📊 Seeding the default chart of accounts...");
    let mut chart = ChartOfAccounts::new(storage.clone());
    let seeded = chart.seed_defaults().await?;
    println!("  ✓ {seeded} accounts created\n");

    // 2. The morning delivery arrives on credit
    println!("🚚 Recording inventory movements...");
    let mut poster = Poster::new(storage.clone());

    let delivery = InventoryMovement {
        id: 1,
        item_id: 12,
        movement_type: MovementType::In,
        quantity: BigDecimal::from(40),
        unit_cost: BigDecimal::from(15),
        total_cost: None,
        reference_type: Some(MovementReference::PurchaseOrder),
    };
    if poster.post_inventory_movement(&delivery, None).await.is_some() {
        println!("  ✓ Produce delivery: 40 x 15 on account");
    }

    // 3. Service: completed orders post as they are paid
    println!("\n💰 Posting completed orders...");
    for (id, total) in [(101, 240), (102, 185), (103, 460)] {
        let order = Order {
            id,
            status: OrderStatus::Completed,
            items: vec![],
            total: BigDecimal::from(total),
        };
        if poster
            .post_completed_order(&order, Some("cashier-2"))
            .await
            .is_some()
        {
            println!("  ✓ Order #{id}: {total}");
        }
    }

    // 4. End of day: a spoiled batch is written off
    let spoilage = InventoryMovement {
        id: 2,
        item_id: 12,
        movement_type: MovementType::Out,
        quantity: BigDecimal::from(3),
        unit_cost: BigDecimal::from(15),
        total_cost: None,
        reference_type: Some(MovementReference::Waste),
    };
    if poster.post_inventory_movement(&spoilage, None).await.is_some() {
        println!("\n🗑️  Wrote off 3 spoiled units");
    }

    // 5. Reports
    let reports = Reports::new(storage);
    let today = chrono::Utc::now().date_naive();

    let pnl = reports.profit_and_loss(today, today).await?;
    println!("\n📈 Profit & Loss ({today})");
    println!("  Revenue:  {}", pnl.total_revenue);
    println!("  Expenses: {}", pnl.total_expenses);
    println!("  Net:      {}", pnl.net_income);

    let sheet = reports.balance_sheet(today).await?;
    println!("\n🏦 Balance Sheet as of {today}");
    for line in &sheet.assets {
        println!("  {} {}: {}", line.account_code, line.account_name, line.amount);
    }
    println!("  Total assets:      {}", sheet.total_assets);
    println!("  Total liabilities: {}", sheet.total_liabilities);

    let flow = reports.cash_flow(today, today).await?;
    println!("\n💵 Cash Flow ({today})");
    for item in &flow.operating {
        println!("  {}: {}", item.description, item.amount);
    }
    println!("  Ending cash: {}", flow.ending_cash);

    Ok(())
}
