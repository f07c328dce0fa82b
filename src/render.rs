//! Notification renderer: canonical document -> reviewer-facing HTML.
//!
//! The output is a self-contained HTML document mirroring the setup form
//! section by section, ending with a verbatim (escaped) JSON dump of the
//! document for audit. Rendering is a pure function: the same document
//! renders to byte-identical HTML.

use crate::domain::SubmissionDocument;

/// Rendered artifact plus its derived subject line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNotification {
    pub subject: String,
    pub html: String,
}

/// Escape a dynamic value for interpolation into tag content or a quoted
/// attribute. Applied uniformly to every submitted value.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverse of [`escape_html`]. The JSON dump section round-trips through
/// this.
pub fn unescape_html(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn esc_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        escape_html(value)
    }
}

fn esc_opt(value: &Option<String>) -> String {
    escape_html(value.as_deref().unwrap_or(""))
}

fn info_item(label: &str, value_html: &str) -> String {
    format!(
        r#"      <div class="info-item">
        <div class="info-label">{label}</div>
        <div class="info-value">{value_html}</div>
      </div>
"#
    )
}

fn color_value(color_html: &str) -> String {
    format!(
        r#"{color_html} <span class="color-preview" style="background-color: {color_html};"></span>"#
    )
}

const STYLE: &str = r#"    body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 800px; margin: 0 auto; padding: 20px; }
    .header { background: linear-gradient(135deg, #2c3e50 0%, #34495e 100%); color: white; padding: 30px; text-align: center; border-radius: 10px; margin-bottom: 30px; }
    .section { background: #f8f9fa; padding: 25px; margin-bottom: 25px; border-radius: 8px; border-left: 5px solid #2c3e50; }
    .section h2 { color: #2c3e50; margin-top: 0; border-bottom: 2px solid #ecf0f1; padding-bottom: 10px; }
    .info-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(250px, 1fr)); gap: 15px; }
    .info-item { background: white; padding: 15px; border-radius: 5px; border: 1px solid #ecf0f1; }
    .info-label { font-weight: bold; color: #2c3e50; margin-bottom: 5px; }
    .info-value { color: #555; }
    .tier-item, .reward-item, .category-item { background: white; padding: 20px; margin-bottom: 15px; border-radius: 8px; border: 1px solid #ecf0f1; }
    .color-preview { display: inline-block; width: 20px; height: 20px; border-radius: 3px; margin-left: 10px; vertical-align: middle; border: 1px solid #ddd; }
    .json-data { background: #2c3e50; color: #ecf0f1; padding: 20px; border-radius: 5px; overflow-x: auto; font-family: 'Courier New', monospace; font-size: 12px; margin-top: 20px; }
    .footer { text-align: center; margin-top: 40px; padding: 20px; background: #ecf0f1; border-radius: 5px; color: #7f8c8d; }
"#;

fn render_partner_info(doc: &SubmissionDocument, out: &mut String) {
    let p = &doc.partner_info;
    let website = escape_html(&p.website);
    let logo_value = match &p.logo_file {
        Some(logo) => escape_html(&logo.original_name),
        None => "No logo uploaded".to_string(),
    };

    out.push_str("  <div class=\"section\">\n    <h2>\u{1F4CB} Partner Information</h2>\n    <div class=\"info-grid\">\n");
    out.push_str(&info_item("Business Name", &escape_html(&p.business_name)));
    out.push_str(&info_item("Card Key", &escape_html(&p.card_key)));
    out.push_str(&info_item(
        "Website",
        &format!(r#"<a href="{website}" target="_blank">{website}</a>"#),
    ));
    out.push_str(&info_item("Brand Tagline", &esc_or(&p.tagline, "Not provided")));
    out.push_str(&info_item("Logo File", &logo_value));
    out.push_str("    </div>\n  </div>\n");
}

fn render_branding(doc: &SubmissionDocument, out: &mut String) {
    let b = &doc.branding;
    out.push_str("  <div class=\"section\">\n    <h2>\u{1F3A8} Branding &amp; Styling</h2>\n    <div class=\"info-grid\">\n");
    out.push_str(&info_item("Primary Color", &color_value(&escape_html(&b.primary_color))));
    out.push_str(&info_item("Secondary Color", &color_value(&escape_html(&b.secondary_color))));
    out.push_str(&info_item("Accent Color", &color_value(&escape_html(&b.accent_color))));
    out.push_str(&info_item("Primary Font", &escape_html(&b.primary_font)));
    out.push_str(&info_item("Header Font", &escape_html(&b.header_font)));
    out.push_str("    </div>\n  </div>\n");
}

fn render_tiers(doc: &SubmissionDocument, out: &mut String) {
    out.push_str(&format!(
        "  <div class=\"section\">\n    <h2>\u{1F3C6} Membership Tiers ({})</h2>\n",
        doc.tiers.len()
    ));
    for (index, tier) in doc.tiers.iter().enumerate() {
        out.push_str(&format!(
            "    <div class=\"tier-item\">\n      <h3 style=\"margin-top: 0; color: #2c3e50;\">{}. {}</h3>\n      <div class=\"info-grid\">\n",
            index + 1,
            escape_html(&tier.name)
        ));
        out.push_str(&info_item("Base Points Required", &escape_html(&tier.base_points)));
        out.push_str(&info_item("Room Nights Required", &escape_html(&tier.room_nights)));
        out.push_str(&info_item(
            "Discount Percentage",
            &format!("{}%", escape_html(&tier.discount)),
        ));
        out.push_str(&info_item("Primary Color", &color_value(&esc_opt(&tier.primary_color))));
        out.push_str(&info_item("Secondary Color", &color_value(&esc_opt(&tier.secondary_color))));
        out.push_str(&info_item("Image URL", &esc_or(&tier.image_url, "Not provided")));
        out.push_str("      </div>\n");
        if !tier.description.is_empty() {
            out.push_str(&format!(
                "      <div style=\"margin-top: 15px;\"><strong>Description:</strong> {}</div>\n",
                escape_html(&tier.description)
            ));
        }
        out.push_str("    </div>\n");
    }
    out.push_str("  </div>\n");
}

fn render_point_credits(doc: &SubmissionDocument, out: &mut String) {
    out.push_str(&format!(
        "  <div class=\"section\">\n    <h2>\u{1F4B3} Point Credits ({})</h2>\n",
        doc.point_credits.len()
    ));
    for (index, credit) in doc.point_credits.iter().enumerate() {
        out.push_str(&format!(
            "    <div class=\"category-item\">\n      <h4 style=\"margin-top: 0; color: #2c3e50;\">{}. {}</h4>\n      <div class=\"info-grid\">\n",
            index + 1,
            escape_html(&credit.category)
        ));
        out.push_str(&info_item("Currency", &esc_opt(&credit.currency)));
        out.push_str(&info_item("Points Multiplier", &esc_opt(&credit.multiplier)));
        out.push_str("      </div>\n    </div>\n");
    }
    out.push_str("  </div>\n");
}

fn render_reward_categories(doc: &SubmissionDocument, out: &mut String) {
    out.push_str(&format!(
        "  <div class=\"section\">\n    <h2>\u{1F4C2} Reward Categories ({})</h2>\n",
        doc.reward_categories.len()
    ));
    for (index, category) in doc.reward_categories.iter().enumerate() {
        out.push_str(&format!(
            "    <div class=\"category-item\">\n      <h4 style=\"margin-top: 0; color: #2c3e50;\">{}. {}</h4>\n",
            index + 1,
            escape_html(&category.name)
        ));
        if !category.description.is_empty() {
            out.push_str(&format!(
                "      <p style=\"margin: 10px 0;\">{}</p>\n",
                escape_html(&category.description)
            ));
        }
        out.push_str("    </div>\n");
    }
    out.push_str("  </div>\n");
}

fn render_rewards(doc: &SubmissionDocument, out: &mut String) {
    out.push_str(&format!(
        "  <div class=\"section\">\n    <h2>\u{1F381} Rewards &amp; Benefits ({})</h2>\n",
        doc.rewards.len()
    ));
    for (index, reward) in doc.rewards.iter().enumerate() {
        out.push_str(&format!(
            "    <div class=\"reward-item\">\n      <h4 style=\"margin-top: 0; color: #2c3e50;\">{}. {}</h4>\n      <div class=\"info-grid\">\n",
            index + 1,
            escape_html(&reward.name)
        ));
        out.push_str(&info_item(
            "Points Required",
            &esc_or(&reward.points_required, "Not specified"),
        ));
        let category = reward.category.as_deref().unwrap_or("");
        out.push_str(&info_item("Category", &esc_or(category, "Not selected")));
        out.push_str("      </div>\n    </div>\n");
    }
    out.push_str("  </div>\n");
}

fn render_json_dump(doc: &SubmissionDocument, out: &mut String) {
    // Serializing the in-memory document cannot fail.
    let json = serde_json::to_string_pretty(doc).unwrap_or_default();
    out.push_str("  <div class=\"section\">\n    <h2>\u{1F4C4} Complete JSON Data</h2>\n    <div class=\"json-data\">\n");
    out.push_str(&escape_html(&json));
    out.push_str("\n    </div>\n  </div>\n");
}

/// Render the notification for one submission document.
pub fn render(doc: &SubmissionDocument) -> RenderedNotification {
    let subject = format!(
        "New Loyalty Program Setup: {}",
        doc.partner_info.business_name
    );

    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n  <title>New Loyalty Program Setup</title>\n  <style>\n");
    html.push_str(STYLE);
    html.push_str("  </style>\n</head>\n<body>\n");
    html.push_str(&format!(
        "  <div class=\"header\">\n    <h1>\u{1F389} New Loyalty Program Setup</h1>\n    <p>Submitted on {}</p>\n  </div>\n",
        escape_html(&doc.submission_timestamp)
    ));

    render_partner_info(doc, &mut html);
    render_branding(doc, &mut html);
    render_tiers(doc, &mut html);
    render_point_credits(doc, &mut html);
    render_reward_categories(doc, &mut html);
    render_rewards(doc, &mut html);
    render_json_dump(doc, &mut html);

    html.push_str("  <div class=\"footer\">\n    <p><strong>Dosink Co., Ltd</strong> - Marketing Technology Solutions</p>\n    <p>This loyalty program setup will be processed within 24 hours.</p>\n  </div>\n</body>\n</html>\n");

    RenderedNotification { subject, html }
}
