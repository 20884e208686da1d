//! Plain-text email templates.
//!
//! Every subject starts with the active site name in brackets.

use storefront_core::currency::format_money;
use storefront_db::models::demo_request::DemoRequest;
use storefront_db::models::message::Message;
use storefront_db::models::order::Order;

use crate::notifier::Notification;

const GENERAL_INQUIRY: &str = "General Inquiry";
const NOT_PROVIDED: &str = "Not provided";

/// Site details every template needs.
#[derive(Debug, Clone)]
pub struct SiteContext {
    pub site_name: String,
    pub currency_symbol: String,
    /// Recipient of admin alerts.
    pub admin_email: String,
}

impl SiteContext {
    fn subject(&self, text: &str) -> String {
        format!("[{}] {text}", self.site_name)
    }
}

fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_PROVIDED
    } else {
        value
    }
}

fn demo_details(demo: &DemoRequest) -> String {
    format!(
        "Name: {}\nEmail: {}\nPhone: {}\nCompany: {}\nInterest Area: {}\nMessage: {}\nProduct: {}",
        demo.full_name,
        demo.email,
        or_placeholder(&demo.phone),
        or_placeholder(&demo.company),
        or_placeholder(&demo.interest_area),
        or_placeholder(&demo.message),
        demo.product_name.as_deref().unwrap_or(GENERAL_INQUIRY),
    )
}

/// Confirmation to the requester and alert to the admin.
pub fn demo_request(site: &SiteContext, demo: &DemoRequest) -> Vec<Notification> {
    let details = demo_details(demo);
    vec![
        Notification {
            to: demo.email.clone(),
            subject: site.subject("Demo Request Confirmation"),
            body: format!(
                "Hello {},\n\nThank you for requesting a demo at {}.\n\nDetails:\n{details}\n\n\
                 We will follow up soon.\n",
                demo.full_name, site.site_name
            ),
        },
        Notification {
            to: site.admin_email.clone(),
            subject: site.subject(&format!("New Demo Request: {}", demo.full_name)),
            body: format!(
                "New demo request received:\n\n{details}\nRequested At: {}\n\n\
                 Follow up within 24 hours.\n",
                demo.requested_at.format("%Y-%m-%d %H:%M:%S")
            ),
        },
    ]
}

/// Confirmation to the customer with the order number and formatted total.
pub fn order_confirmation(site: &SiteContext, order: &Order) -> Notification {
    Notification {
        to: order.customer_email.clone(),
        subject: site.subject(&format!("Order Confirmation #{}", order.order_number)),
        body: format!(
            "Hello {},\n\nThank you for your order!\n\nOrder Number: {}\nTotal: {}\n\n\
             We will contact you shortly.\n\nRegards,\n{}\n",
            order.customer_name,
            order.order_number,
            format_money(&site.currency_symbol, order.total),
            site.site_name
        ),
    }
}

fn message_details(message: &Message) -> String {
    format!(
        "Name: {}\nEmail: {}\nPhone: {}\nService: {}\n\nMessage:\n{}\n\nSubmitted At: {}",
        message.name,
        message.email,
        or_placeholder(&message.phone),
        or_placeholder(&message.service),
        message.message,
        message.created_at.format("%Y-%m-%d %H:%M:%S")
    )
}

fn acknowledgement(site: &SiteContext, message: &Message) -> Notification {
    Notification {
        to: message.email.clone(),
        subject: site.subject("Message Received"),
        body: format!(
            "Hello {},\n\nWe have received your message at {}.\n\nDetails:\n{}\n\n\
             We will reply within 24-48 hours.\nThank you.\n",
            message.name,
            site.site_name,
            message_details(message)
        ),
    }
}

/// Acknowledgement to the sender and alert to the admin.
pub fn contact_message(site: &SiteContext, message: &Message) -> Vec<Notification> {
    vec![
        acknowledgement(site, message),
        Notification {
            to: site.admin_email.clone(),
            subject: site.subject(&format!("New Contact Message from {}", message.name)),
            body: format!(
                "New contact message received:\n\n{}\n\nMessage ID: {}\n",
                message_details(message),
                message.id
            ),
        },
    ]
}

/// Acknowledgement to the sender of a portfolio message.
pub fn portfolio_message(site: &SiteContext, message: &Message) -> Notification {
    acknowledgement(site, message)
}
