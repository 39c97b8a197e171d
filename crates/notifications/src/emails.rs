//! Builders for the three business-event emails.
//!
//! Each builder is pure: it takes the event data plus an [`EmailContext`]
//! and returns the subject and rendered HTML. Every caller-supplied string is
//! HTML-escaped before it is interpolated.

use vendorpo_core::html::escape_html;
use vendorpo_core::money::{format_currency, format_percent, round_percent, Locale};

use crate::template::render_layout;
use crate::transport::OutgoingEmail;

/// Green used for approvals.
pub const COLOR_SUCCESS: &str = "#16a34a";

/// Red used for rejections, overdue invoices, and critical budget alerts.
pub const COLOR_DANGER: &str = "#dc2626";

/// Amber used for budget warnings below the critical threshold.
pub const COLOR_WARNING: &str = "#d97706";

/// Panel backgrounds paired with the colors above.
const BACKGROUND_SUCCESS: &str = "#f0fdf4";
const BACKGROUND_DANGER: &str = "#fef2f2";
const BACKGROUND_WARNING: &str = "#fffbeb";

/// Utilization (percent) at or above which a budget alert turns red.
pub const BUDGET_CRITICAL_THRESHOLD: f64 = 90.0;

/// The only status rendered as a successful approval.
pub const STATUS_APPROVED: &str = "Approved";

/// Rendering inputs that come from configuration rather than the event.
#[derive(Debug, Clone, Copy)]
pub struct EmailContext<'a> {
    pub frontend_url: &'a str,
    pub locale: Locale,
}

/// Subject and HTML body of a notification email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

impl RenderedEmail {
    /// Address the rendered email to a recipient.
    pub fn to(self, recipient: &str) -> OutgoingEmail {
        OutgoingEmail {
            to: recipient.to_string(),
            subject: self.subject,
            html: self.html,
        }
    }
}

// ---------------------------------------------------------------------------
// Purchase order approval
// ---------------------------------------------------------------------------

/// Notify a requester that a purchase order was approved or rejected.
///
/// Only the exact status `"Approved"` gets the green check panel; anything
/// else is shown as a red cross. The comments line is omitted when
/// `comments` is `None` or empty.
pub fn po_approval(
    ctx: &EmailContext<'_>,
    po_number: &str,
    status: &str,
    approver_name: &str,
    comments: Option<&str>,
) -> RenderedEmail {
    let approved = status == STATUS_APPROVED;
    let (color, background, glyph) = if approved {
        (COLOR_SUCCESS, BACKGROUND_SUCCESS, "✓")
    } else {
        (COLOR_DANGER, BACKGROUND_DANGER, "✗")
    };

    let po = escape_html(po_number);
    let status_html = escape_html(status);
    let approver = escape_html(approver_name);

    let mut body = status_panel(color, background, &format!("{glyph} {status_html}"));
    body.push_str(&format!(
        "<p>Purchase order <strong>{po}</strong> has been {status_html} by <strong>{approver}</strong>.</p>"
    ));
    if let Some(comments) = comments.filter(|c| !c.is_empty()) {
        body.push_str(&format!(
            "<p><strong>Comments:</strong> {}</p>",
            escape_html(comments)
        ));
    }
    body.push_str(&action_link(ctx, "purchase-orders", "View Purchase Orders"));

    RenderedEmail {
        subject: format!("Purchase Order {po_number} {status}"),
        html: render_layout(&format!("Purchase Order {status}"), &body),
    }
}

// ---------------------------------------------------------------------------
// Overdue invoice
// ---------------------------------------------------------------------------

/// Alert finance that a vendor invoice is past due.
pub fn overdue_invoice(
    ctx: &EmailContext<'_>,
    invoice_number: &str,
    vendor_name: &str,
    amount: f64,
    days_overdue: u32,
) -> RenderedEmail {
    let invoice = escape_html(invoice_number);
    let vendor = escape_html(vendor_name);
    let amount = escape_html(&format_currency(amount, ctx.locale));
    let days = if days_overdue == 1 {
        "1 day".to_string()
    } else {
        format!("{days_overdue} days")
    };

    let mut body = status_panel(COLOR_DANGER, BACKGROUND_DANGER, &format!("⚠ {days} overdue"));
    body.push_str(&format!(
        "<p>Invoice <strong>{invoice}</strong> from <strong>{vendor}</strong> is {days} past its due date.</p>"
    ));
    body.push_str(&format!(
        "<p><strong>Amount due:</strong> <span style=\"color:{COLOR_DANGER};\">{amount}</span></p>"
    ));
    body.push_str(&action_link(ctx, "invoices", "Review Invoices"));

    RenderedEmail {
        subject: format!("Overdue Invoice: {invoice_number}"),
        html: render_layout("Overdue Invoice Alert", &body),
    }
}

// ---------------------------------------------------------------------------
// Budget threshold
// ---------------------------------------------------------------------------

/// Warn a department that its budget utilization crossed a threshold.
///
/// Red at or above [`BUDGET_CRITICAL_THRESHOLD`], amber below it.
pub fn budget_alert(
    ctx: &EmailContext<'_>,
    department: &str,
    utilization_percent: f64,
    spent_amount: f64,
    limit_amount: f64,
) -> RenderedEmail {
    let color = budget_color(utilization_percent);
    let background = if color == COLOR_DANGER {
        BACKGROUND_DANGER
    } else {
        BACKGROUND_WARNING
    };
    let dept = escape_html(department);
    let pct = format_percent(utilization_percent);
    let spent = escape_html(&format_currency(spent_amount, ctx.locale));
    let limit = escape_html(&format_currency(limit_amount, ctx.locale));
    let bar_width = utilization_percent.clamp(0.0, 100.0);

    let mut body = status_panel(color, background, &format!("{pct}% of budget used"));
    body.push_str(&format!(
        "<p>The <strong>{dept}</strong> department has used <strong style=\"color:{color};\">{pct}%</strong> of its budget.</p>"
    ));
    body.push_str(&format!(
        "<div style=\"background:#e5e7eb;border-radius:4px;height:12px;margin:12px 0;\">\
         <div style=\"background:{color};border-radius:4px;height:12px;width:{bar_width:.0}%;\"></div>\
         </div>"
    ));
    body.push_str(&format!(
        "<p><strong>Spent:</strong> {spent}<br><strong>Limit:</strong> {limit}</p>"
    ));
    body.push_str(&action_link(ctx, "budgets", "View Budgets"));

    RenderedEmail {
        subject: format!("Budget Alert: {department} at {pct}% utilization"),
        html: render_layout("Budget Alert", &body),
    }
}

/// Alert color for a utilization percentage.
///
/// The comparison uses the value as displayed, so an alert never reads
/// "90%" in amber.
pub fn budget_color(utilization_percent: f64) -> &'static str {
    if round_percent(utilization_percent) >= BUDGET_CRITICAL_THRESHOLD {
        COLOR_DANGER
    } else {
        COLOR_WARNING
    }
}

// ---------------------------------------------------------------------------
// Fragments
// ---------------------------------------------------------------------------

/// Colored call-out panel. `label_html` must already be escaped.
fn status_panel(color: &str, background: &str, label_html: &str) -> String {
    format!(
        "<div style=\"background:{background};border-left:4px solid {color};padding:16px;margin:16px 0;\">\
         <p style=\"margin:0;font-size:18px;font-weight:bold;color:{color};\">{label_html}</p>\
         </div>"
    )
}

/// Button-style link into the web app.
fn action_link(ctx: &EmailContext<'_>, path: &str, label: &str) -> String {
    let href = escape_html(&format!("{}/{path}", ctx.frontend_url));
    format!(
        "<p style=\"margin-top:24px;\"><a href=\"{href}\" \
         style=\"background:#1e3a8a;color:#ffffff;padding:10px 18px;border-radius:4px;text-decoration:none;\">{label}</a></p>"
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> EmailContext<'static> {
        EmailContext {
            frontend_url: "http://localhost:5173",
            locale: Locale::EnUs,
        }
    }

    // -- po_approval ---------------------------------------------------------

    #[test]
    fn approved_po_renders_green_marker_without_comments() {
        let email = po_approval(&ctx(), "PO-1001", "Approved", "Jane", None);

        assert_eq!(email.subject, "Purchase Order PO-1001 Approved");
        assert!(email.html.contains(&format!("color:{COLOR_SUCCESS};\">✓ Approved")));
        assert!(!email.html.contains(COLOR_DANGER));
        assert!(!email.html.contains("Comments"));
        assert!(email.html.contains("<strong>Jane</strong>"));
        assert!(email
            .html
            .contains("href=\"http://localhost:5173/purchase-orders\""));
    }

    #[test]
    fn rejected_po_renders_red_marker() {
        let email = po_approval(&ctx(), "PO-1001", "Rejected", "Jane", None);

        assert_eq!(email.subject, "Purchase Order PO-1001 Rejected");
        assert!(email.html.contains(&format!("color:{COLOR_DANGER};\">✗ Rejected")));
        assert!(!email.html.contains(COLOR_SUCCESS));
    }

    #[test]
    fn status_match_is_exact() {
        let email = po_approval(&ctx(), "PO-7", "approved", "Jane", None);
        assert!(email.html.contains("✗ approved"));
    }

    #[test]
    fn comments_included_only_when_present() {
        let with = po_approval(&ctx(), "PO-2", "Rejected", "Raj", Some("Over budget"));
        assert!(with
            .html
            .contains("<p><strong>Comments:</strong> Over budget</p>"));

        let empty = po_approval(&ctx(), "PO-2", "Rejected", "Raj", Some(""));
        assert!(!empty.html.contains("Comments"));

        let blank = po_approval(&ctx(), "PO-2", "Rejected", "Raj", Some("   "));
        assert!(blank.html.contains("<strong>Comments:</strong>"));
    }

    #[test]
    fn po_values_are_escaped() {
        let email = po_approval(
            &ctx(),
            "PO-<1>",
            "Approved",
            "<script>alert('x')</script>",
            Some("a & b"),
        );
        assert!(!email.html.contains("<script>"));
        assert!(email
            .html
            .contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(email.html.contains("PO-&lt;1&gt;"));
        assert!(email.html.contains("a &amp; b"));
    }

    // -- overdue_invoice -----------------------------------------------------

    #[test]
    fn overdue_invoice_is_always_red_with_formatted_amount() {
        let email = overdue_invoice(&ctx(), "INV-42", "Globex Supplies", 1234567.0, 12);

        assert_eq!(email.subject, "Overdue Invoice: INV-42");
        assert!(email.html.contains(COLOR_DANGER));
        assert!(email.html.contains("$1,234,567"));
        assert!(email.html.contains("12 days past its due date"));
        assert!(email.html.contains("<strong>Globex Supplies</strong>"));
        assert!(email.html.contains("href=\"http://localhost:5173/invoices\""));
    }

    #[test]
    fn overdue_invoice_singular_day() {
        let email = overdue_invoice(&ctx(), "INV-1", "Initech", 50.0, 1);
        assert!(email.html.contains("1 day past its due date"));
    }

    #[test]
    fn overdue_invoice_uses_context_locale() {
        let de = EmailContext {
            frontend_url: "https://app.acme.test",
            locale: Locale::DeDe,
        };
        let email = overdue_invoice(&de, "INV-9", "Müller & Co", 1234.5, 3);
        assert!(email.html.contains("1.234,50\u{a0}€"));
        assert!(email.html.contains("Müller &amp; Co"));
    }

    // -- budget_alert --------------------------------------------------------

    #[test]
    fn budget_at_95_percent_is_red() {
        let email = budget_alert(&ctx(), "Engineering", 95.0, 95000.0, 100000.0);

        assert_eq!(email.subject, "Budget Alert: Engineering at 95% utilization");
        assert!(email.html.contains(&format!("color:{COLOR_DANGER};\">95%")));
        assert!(!email.html.contains(COLOR_WARNING));
        assert!(email.html.contains("$95,000"));
        assert!(email.html.contains("$100,000"));
        assert!(email.html.contains(&format!("background:{BACKGROUND_DANGER};")));
        assert!(!email.html.contains(BACKGROUND_WARNING));
    }

    #[test]
    fn budget_at_80_percent_is_amber() {
        let email = budget_alert(&ctx(), "Engineering", 80.0, 80000.0, 100000.0);
        assert!(email.html.contains(&format!("color:{COLOR_WARNING};\">80%")));
        assert!(!email.html.contains(COLOR_DANGER));
        assert!(email.html.contains(&format!("background:{BACKGROUND_WARNING};")));
    }

    #[test]
    fn budget_threshold_boundary() {
        assert_eq!(budget_color(90.0), COLOR_DANGER);
        assert_eq!(budget_color(89.9), COLOR_WARNING);
        assert_eq!(budget_color(89.96), COLOR_DANGER);
        assert_eq!(budget_color(89.94), COLOR_WARNING);
        assert_eq!(budget_color(120.0), COLOR_DANGER);
    }

    #[test]
    fn budget_just_under_threshold_displays_and_colors_as_critical() {
        let email = budget_alert(&ctx(), "Ops", 89.96, 899.6, 1000.0);
        assert_eq!(email.subject, "Budget Alert: Ops at 90% utilization");
        assert!(email.html.contains(&format!("color:{COLOR_DANGER};\">90%")));
        assert!(!email.html.contains(COLOR_WARNING));
    }

    #[test]
    fn budget_bar_is_clamped() {
        let email = budget_alert(&ctx(), "Ops", 130.0, 130.0, 100.0);
        assert!(email.html.contains("width:100%"));
    }

    #[test]
    fn department_is_escaped() {
        let email = budget_alert(&ctx(), "R&D <Labs>", 50.0, 5.0, 10.0);
        assert!(email.html.contains("R&amp;D &lt;Labs&gt;"));
        assert!(!email.html.contains("<Labs>"));
    }

    // -- RenderedEmail -------------------------------------------------------

    #[test]
    fn rendered_email_addresses_recipient() {
        let outgoing = overdue_invoice(&ctx(), "INV-3", "Hooli", 10.0, 2).to("ap@acme.test");
        assert_eq!(outgoing.to, "ap@acme.test");
        assert_eq!(outgoing.subject, "Overdue Invoice: INV-3");
    }
}
