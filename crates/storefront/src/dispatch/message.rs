//! Human-readable order rendering for the messaging and mail channels.

use crate::checkout::{Delivery, Order};

/// Render `order` as the human-readable message carried by the messaging
/// deep link: customer, phone, itemized lines, subtotal, delivery method,
/// address when shipping, and notes when present.
///
/// Amounts are rounded to two decimal places here; internal totals keep
/// full precision.
#[must_use]
pub fn render_message(order: &Order, currency: &str) -> String {
    let mut message = format!("*New Order from {}*\n\n", order.customer_name);
    message.push_str(&format!("*Customer:* {}\n", order.customer_name));
    message.push_str(&format!("*Phone:* {}\n\n", order.customer_phone));
    message.push_str("*Items:*\n");
    for line in &order.lines {
        message.push_str(&format!(
            "- {} (#{}) x {} @ {currency} {:.2}\n",
            line.name,
            line.part_number,
            line.quantity,
            line.unit_price.amount(),
        ));
    }
    message.push_str(&format!("\n*Subtotal: {currency} {:.2}*\n\n", order.total));
    message.push_str(&format!("*Delivery Method:* {}\n", order.delivery.method()));
    if let Delivery::Shipping { address } = &order.delivery {
        message.push_str(&format!("*Address:* {address}\n"));
    }
    if let Some(notes) = order.notes.as_deref() {
        message.push_str(&format!("*Notes:* {notes}\n"));
    }
    message
}

/// Markup-free rendering for the mail body.
#[must_use]
pub fn plain_message(order: &Order, currency: &str) -> String {
    render_message(order, currency).replace('*', "")
}
