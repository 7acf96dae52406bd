//! Built-in demo specification covering every slide type once.

use serde_json::{json, Value};

/// The demo deck: eleven slides, one of each registered type.
pub fn demo_spec() -> Value {
    json!({
        "title": "Template_Demo",
        "slides": [
            {
                "type": "cover",
                "title": "Presentation Title",
                "subtitle": "Subtitle or tagline goes here",
                "date": "Month Year"
            },
            {
                "type": "section_divider",
                "title": "Section Title",
                "subtitle": "Brief description of this section"
            },
            {
                "type": "agenda",
                "items": [
                    "Introduction & Context",
                    "Problem Statement",
                    "Our Approach & Solution",
                    "Key Results & Metrics",
                    "Next Steps & Discussion"
                ]
            },
            {
                "type": "content",
                "title": "Content Slide Title",
                "body": "Add your key points here. The template uses generous whitespace\nand brand-consistent typography for a clean, modern look.\n\nUse this layout for text-heavy slides that need a supporting visual.",
                "image_placeholder": "Visual / Image"
            },
            {
                "type": "two_column",
                "title": "Two-Column Layout",
                "left_title": "Left Column",
                "left_body": "Supporting text for the first column. Use for\ncomparisons, features, or parallel content.",
                "right_title": "Right Column",
                "right_body": "Supporting text for the second column.\nMaintain visual balance between columns."
            },
            {
                "type": "quote",
                "text": "A bold statement that captures\nyour key message in one line.",
                "attribution": "Speaker Name, Title"
            },
            {
                "type": "metrics",
                "title": "Key Metrics",
                "metrics": [
                    { "value": "98%", "label": "Customer Satisfaction" },
                    { "value": "3.5x", "label": "ROI Improvement" },
                    { "value": "500+", "label": "Active Projects" },
                    { "value": "24/7", "label": "Global Support" }
                ]
            },
            {
                "type": "team",
                "title": "Our Team",
                "members": [
                    { "name": "Team Member 1", "role": "Role / Title", "bio": "Brief bio or expertise\narea description." },
                    { "name": "Team Member 2", "role": "Role / Title", "bio": "Brief bio or expertise\narea description." },
                    { "name": "Team Member 3", "role": "Role / Title", "bio": "Brief bio or expertise\narea description." },
                    { "name": "Team Member 4", "role": "Role / Title", "bio": "Brief bio or expertise\narea description." }
                ]
            },
            {
                "type": "case_study",
                "title": "Case Study: Client Name",
                "challenge": "Describe the client's\nchallenge or pain point\nthat needed addressing.",
                "solution": "Explain the approach\nand how the solution\nwas implemented.",
                "results": "Share quantifiable\noutcomes and the\nimpact delivered."
            },
            {
                "type": "closing",
                "title": "Thank You",
                "subtitle": "Questions? Let's discuss.",
                "contact": "hello@example.com  |  example.com",
                "cta_text": "Contact Us"
            },
            {
                "type": "blank"
            }
        ]
    })
}
