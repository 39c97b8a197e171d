//! Branded HTML layout shared by every notification email.

use vendorpo_core::html::escape_html;

/// Product name shown in the header and footer.
pub const BRAND_NAME: &str = "Vendor & PO Manager";

/// Wrap a title and a body fragment in the branded layout.
///
/// `title` is escaped here. `body_html` is inserted as-is: callers build it
/// from escaped values.
pub fn render_layout(title: &str, body_html: &str) -> String {
    let title = escape_html(title);
    let brand = escape_html(BRAND_NAME);
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{title}</title></head>
<body style="margin:0;padding:0;background:#f3f4f6;font-family:Arial,Helvetica,sans-serif;">
  <div style="max-width:600px;margin:0 auto;background:#ffffff;">
    <div style="background:#1e3a8a;color:#ffffff;padding:20px 24px;">
      <h1 style="margin:0;font-size:20px;">{brand}</h1>
    </div>
    <div style="padding:24px;color:#111827;line-height:1.5;">
      <h2 style="margin-top:0;">{title}</h2>
      {body_html}
    </div>
    <div style="padding:16px 24px;background:#f9fafb;color:#6b7280;font-size:12px;">
      This is an automated message from {brand}. Please do not reply.
    </div>
  </div>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_contains_header_body_and_footer() {
        let html = render_layout("Budget Alert", "<p>body fragment</p>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1 style=\"margin:0;font-size:20px;\">Vendor &amp; PO Manager</h1>"));
        assert!(html.contains("<h2 style=\"margin-top:0;\">Budget Alert</h2>"));
        assert!(html.contains("<p>body fragment</p>"));
        assert!(html.contains("Please do not reply."));
    }

    #[test]
    fn title_is_escaped() {
        let html = render_layout("<img src=x onerror=alert(1)>", "");
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    }
}
