// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `trustline orders` admin commands.

use clap::Subcommand;
use colored::Colorize;

use trustline_config::TrustlineConfig;
use trustline_core::types::{OrderStatus, PaymentMethod};
use trustline_core::TrustlineError;
use trustline_storage::{NewOrder, OrderPatch, OrderStore};

#[derive(Subcommand, Debug)]
pub enum OrdersCommand {
    /// List all orders with their status.
    List,
    /// Show one order as JSON.
    Show { order_id: String },
    /// Create a new order (status starts as `received`).
    Create {
        order_id: String,
        #[arg(long)]
        customer_name: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        delivery_address: String,
        /// Repeatable: one item per flag.
        #[arg(long = "item")]
        items: Vec<String>,
        /// cash, card, online, or wallet.
        #[arg(long, default_value = "cash")]
        payment_method: String,
    },
    /// Move an order to a new status (key or bilingual label).
    SetStatus { order_id: String, status: String },
    /// Update order fields; omitted flags are left unchanged.
    Update {
        order_id: String,
        #[arg(long)]
        customer_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        delivery_address: Option<String>,
        #[arg(long = "item")]
        items: Option<Vec<String>>,
        #[arg(long)]
        payment_method: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
}

pub async fn run(config: &TrustlineConfig, command: OrdersCommand) -> Result<(), TrustlineError> {
    let store = OrderStore::new(config.storage.orders_path());

    match command {
        OrdersCommand::List => {
            let orders = store.load_all();
            if orders.is_empty() {
                println!("no orders");
                return Ok(());
            }
            for (id, order) in &orders {
                println!(
                    "{} | {} | {} | {}",
                    id.bold(),
                    order.status,
                    order.customer_name,
                    order.last_updated.dimmed()
                );
            }
            Ok(())
        }
        OrdersCommand::Show { order_id } => match store.find_by_id(&order_id) {
            Some(order) => {
                let rendered = serde_json::to_string_pretty(&order)
                    .map_err(|e| TrustlineError::Internal(format!("render order: {e}")))?;
                println!("{rendered}");
                Ok(())
            }
            None => Err(TrustlineError::Validation(format!(
                "order {order_id} not found"
            ))),
        },
        OrdersCommand::Create {
            order_id,
            customer_name,
            phone,
            delivery_address,
            items,
            payment_method,
        } => {
            store
                .create(NewOrder {
                    order_id: order_id.clone(),
                    customer_name,
                    phone,
                    delivery_address,
                    items,
                    payment_method: PaymentMethod::normalize(&payment_method),
                })
                .await?;
            println!("created {}", order_id.bold());
            Ok(())
        }
        OrdersCommand::SetStatus { order_id, status } => {
            let status = OrderStatus::normalize(&status)?;
            store.update_status(&order_id, status).await?;
            println!("{} -> {status}", order_id.bold());
            Ok(())
        }
        OrdersCommand::Update {
            order_id,
            customer_name,
            phone,
            delivery_address,
            items,
            payment_method,
            status,
        } => {
            let patch = OrderPatch {
                customer_name,
                phone,
                delivery_address,
                items,
                payment_method: payment_method.as_deref().map(PaymentMethod::normalize),
                status: status.as_deref().map(OrderStatus::normalize).transpose()?,
            };
            store.update(&order_id, patch).await?;
            println!("updated {}", order_id.bold());
            Ok(())
        }
    }
}
