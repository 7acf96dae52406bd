//! One layout function per slide type.
//!
//! Every renderer draws exactly one slide through a [`SlideBuilder`]. Layout
//! positions are in inches on the 13.333 × 7.5 canvas.

use crate::builder::{ButtonOptions, Card, LogoVariant, SlideBuilder, TextOptions};
use crate::options::DeckOptions;
use deck_core::spec::{
    AgendaSlide, BlankSlide, CaseStudySlide, ClosingSlide, ContentSlide, CoverSlide, MetricsSlide,
    QuoteSlide, SectionDividerSlide, TeamSlide, TwoColumnSlide,
};
use deck_core::{hex_to_color, Color, Placement, Result, SlideSpec, Theme};
use deck_pptx::{Align, Run, Slide};

const METRICS_BACKGROUND: Color = Color::rgb(0xF7, 0xF8, 0xFC);
const MIN_METRIC_CARD_WIDTH: f64 = 1.0;
const MIN_TEAM_CARD_WIDTH: f64 = 1.6;

/// Render one slide record into a detached slide.
pub fn render_slide(theme: &Theme, options: &DeckOptions, spec: &SlideSpec) -> Result<Slide> {
    let mut sb = SlideBuilder::new(theme, options);
    match spec {
        SlideSpec::Cover(s) => render_cover(&mut sb, s)?,
        SlideSpec::SectionDivider(s) => render_section_divider(&mut sb, s)?,
        SlideSpec::Agenda(s) => render_agenda(&mut sb, s)?,
        SlideSpec::Content(s) => render_content(&mut sb, s)?,
        SlideSpec::TwoColumn(s) => render_two_column(&mut sb, s)?,
        SlideSpec::Quote(s) => render_quote(&mut sb, s)?,
        SlideSpec::Metrics(s) => render_metrics(&mut sb, s)?,
        SlideSpec::Team(s) => render_team(&mut sb, s)?,
        SlideSpec::CaseStudy(s) => render_case_study(&mut sb, s)?,
        SlideSpec::Closing(s) => render_closing(&mut sb, s)?,
        SlideSpec::Blank(s) => render_blank(&mut sb, s)?,
    }
    Ok(sb.finish())
}

/// Color for the `i`th repeated item.
fn rotate(colors: &[Color], i: usize) -> Color {
    colors[i % colors.len()]
}

/// Logo, accent bar and h2 title shared by the interior layouts.
fn interior_header(sb: &mut SlideBuilder<'_>, title: &str, bar_y: f64) -> Result<()> {
    sb.set_background(Color::WHITE);
    sb.add_logo(LogoVariant::Colored, Placement::UpperLeft, 1.8, 0.45)?;
    let m = sb.margin();
    sb.add_accent_bar(m, bar_y, 0.8, 0.06, None)?;
    let h2 = sb.theme().type_scale.h2;
    sb.add_title(title, TextOptions::new().y(bar_y + 0.2).size(h2))?;
    Ok(())
}

fn footer(sb: &mut SlideBuilder<'_>) -> Result<()> {
    let text = sb.options().footer_text.as_str();
    sb.add_footer(text, true, None)
}

pub fn render_cover(sb: &mut SlideBuilder<'_>, slide: &CoverSlide) -> Result<()> {
    let theme = sb.theme();
    let colors = &theme.colors;
    let (m, w, h) = (sb.margin(), sb.width(), sb.height());
    sb.set_background(Color::WHITE);

    sb.add_gradient_rect(7.5, 0.0, w - 7.5, h, colors.primary_dark, colors.primary_bright, 135.0)?;
    for (x, y, color) in [
        (8.2, 1.5, colors.accent_alt),
        (9.8, 2.0, colors.accent),
        (8.8, 5.0, colors.primary_bright),
        (10.5, 4.2, colors.accent_alt),
    ] {
        sb.add_dot(x, y, 0.35, color, Some(30.0))?;
    }

    if let Some(favicon) = theme.logos.favicon_colored.locate() {
        let size = 3.5;
        sb.add_image(favicon, 9.0 - size / 2.0, 3.75 - size / 2.0, size, size)?;
    }

    sb.add_logo(LogoVariant::Colored, Placement::UpperLeft, 2.4, 0.65)?;
    sb.add_title(
        &slide.title,
        TextOptions::at(m, 2.4, 6.5, 1.8)
            .size(48.0)
            .color(colors.primary_dark),
    )?;

    let subtitle = slide.subtitle.as_deref().unwrap_or("");
    let date = slide.date.as_deref().unwrap_or("");
    let sub_text = match (subtitle.is_empty(), date.is_empty()) {
        (_, true) => subtitle.to_string(),
        (true, false) => date.to_string(),
        (false, false) => format!("{}\n{}", subtitle, date),
    };
    if !sub_text.is_empty() {
        sb.add_body(
            &sub_text,
            TextOptions::at(m, 4.3, 6.0, 1.2)
                .size(20.0)
                .color(colors.primary_bright),
        )?;
    }

    let cta = slide.cta_text.as_deref().unwrap_or("Get Started");
    sb.add_button(cta, m, 5.8, ButtonOptions::default())?;

    let text = sb.options().cover_footer();
    sb.add_footer(&text, false, None)
}

pub fn render_section_divider(sb: &mut SlideBuilder<'_>, slide: &SectionDividerSlide) -> Result<()> {
    let bg = slide.bg_color.as_deref().map(hex_to_color);
    let subtitle = slide.subtitle.as_deref().unwrap_or("");
    sb.add_section_header(&slide.title, subtitle, bg)?;
    sb.add_logo(LogoVariant::White, Placement::LowerLeft, 1.8, 0.45)?;
    Ok(())
}

pub fn render_agenda(sb: &mut SlideBuilder<'_>, slide: &AgendaSlide) -> Result<()> {
    let theme = sb.theme();
    let colors = &theme.colors;
    let m = sb.margin();
    sb.set_background(Color::WHITE);

    sb.add_accent_bar(m, 0.9, 0.8, 0.06, None)?;
    let title = slide.title.as_deref().unwrap_or("Agenda");
    sb.add_title(title, TextOptions::new().y(1.1).size(theme.type_scale.h2))?;

    let accents = [
        colors.primary_bright,
        colors.primary_dark,
        colors.accent_alt,
        colors.accent,
        colors.primary_bright,
    ];
    for (i, item) in slide.items.iter().enumerate() {
        let y = 2.4 + i as f64 * 0.85;
        let accent = rotate(&accents, i);
        let number = Run::new((i + 1).to_string())
            .size(16.0)
            .bold(true)
            .color(accent.readable_text())
            .font(theme.fonts.headline.as_str());
        sb.add_badge(m, y, 0.5, accent, number)?;
        sb.add_body(
            item,
            TextOptions::at(m + 0.75, y + 0.05, 10.0, 0.5)
                .size(18.0)
                .color(colors.gray)
                .bold(false),
        )?;
    }

    footer(sb)?;
    sb.add_logo(LogoVariant::Colored, Placement::UpperLeft, 1.8, 0.45)?;
    Ok(())
}

pub fn render_content(sb: &mut SlideBuilder<'_>, slide: &ContentSlide) -> Result<()> {
    let theme = sb.theme();
    let m = sb.margin();
    interior_header(sb, &slide.title, 1.2)?;

    let frame = TextOptions::at(m, 2.5, 5.5, 3.5).size(15.0);
    if !slide.bullet_items.is_empty() {
        sb.add_bullet_list(&slide.bullet_items, frame, None)?;
    } else {
        let body = slide
            .body
            .as_deref()
            .filter(|b| !b.is_empty())
            .unwrap_or("Add your key points here.");
        sb.add_body(body, frame.color(theme.colors.gray))?;
    }

    let label = slide.image_placeholder.as_deref().unwrap_or("Visual / Image");
    sb.add_placeholder_image(7.0, 1.4, 5.7, 4.8, label)?;
    footer(sb)
}

pub fn render_two_column(sb: &mut SlideBuilder<'_>, slide: &TwoColumnSlide) -> Result<()> {
    let colors = &sb.theme().colors;
    let (m, g) = (sb.margin(), sb.gutter());
    interior_header(sb, &slide.title, 1.2)?;

    let col_w = 5.8;
    let columns = [
        (m, &slide.left_title, slide.left_body.as_deref()),
        (m + col_w + g, &slide.right_title, slide.right_body.as_deref()),
    ];
    for (x, title, body) in columns {
        sb.add_card(x, 2.5, col_w, 4.0, Card::default())?;
        sb.add_body(
            title,
            TextOptions::at(x + 0.3, 2.7, col_w - 0.6, 0.5)
                .size(20.0)
                .color(colors.primary_dark)
                .bold(true),
        )?;
        if let Some(body) = body.filter(|b| !b.is_empty()) {
            sb.add_body(
                body,
                TextOptions::at(x + 0.3, 3.3, col_w - 0.6, 2.5)
                    .size(14.0)
                    .color(colors.gray),
            )?;
        }
    }

    footer(sb)
}

pub fn render_quote(sb: &mut SlideBuilder<'_>, slide: &QuoteSlide) -> Result<()> {
    let colors = &sb.theme().colors;
    let m = sb.margin();
    sb.set_background(colors.primary_dark);

    sb.add_title(
        "\u{201C}",
        TextOptions::at(m, 1.0, 2.0, 2.0)
            .size(160.0)
            .color(colors.primary_bright),
    )?;
    sb.add_title(
        &slide.text,
        TextOptions::at(1.2, 2.8, 10.5, 2.0)
            .size(36.0)
            .color(Color::WHITE),
    )?;

    if let Some(attribution) = slide.attribution.as_deref().filter(|a| !a.is_empty()) {
        sb.add_body(
            &format!("\u{2014} {}", attribution),
            TextOptions::at(1.2, 5.0, 8.0, 0.6)
                .size(16.0)
                .color(colors.primary_bright),
        )?;
    }

    for (x, y, color) in [(11.5, 5.5, colors.accent_alt), (12.0, 5.0, colors.accent)] {
        sb.add_dot(x, y, 0.25, color, None)?;
    }

    sb.add_logo(LogoVariant::White, Placement::LowerLeft, 1.8, 0.45)?;
    Ok(())
}

/// How many cards of at least `min_w` fit side by side in `span`. Never zero.
fn row_capacity(span: f64, gap: f64, min_w: f64) -> usize {
    (((span + gap) / (min_w + gap)).floor() as usize).max(1)
}

pub fn render_metrics(sb: &mut SlideBuilder<'_>, slide: &MetricsSlide) -> Result<()> {
    let colors = &sb.theme().colors;
    let (m, w) = (sb.margin(), sb.width());
    interior_header(sb, &slide.title, 1.1)?;
    sb.set_background(METRICS_BACKGROUND);

    let n = slide.metrics.len();
    if n == 0 {
        return Ok(());
    }

    let gap = 0.35;
    let shown = n.min(row_capacity(w - 2.0 * m, gap, MIN_METRIC_CARD_WIDTH));
    if shown < n {
        log::warn!("Metrics slide shows {} of {} metrics", shown, n);
    }
    let usable = w - 2.0 * m - gap * (shown - 1) as f64;
    let card_w = (usable / shown as f64).min(2.7);
    let accents = [
        colors.primary_bright,
        colors.primary_dark,
        colors.accent_alt,
        colors.accent,
    ];
    for (i, metric) in slide.metrics.iter().take(shown).enumerate() {
        let x = m + i as f64 * (card_w + gap);
        sb.add_metric_card(x, 2.3, card_w, 1.6, &metric.value, &metric.label, rotate(&accents, i))?;
    }

    let label = slide
        .chart_label
        .as_deref()
        .unwrap_or("Chart / Data Visualization");
    sb.add_placeholder_image(m, 4.3, 11.8, 2.5, label)?;
    footer(sb)
}

pub fn render_team(sb: &mut SlideBuilder<'_>, slide: &TeamSlide) -> Result<()> {
    let theme = sb.theme();
    let colors = &theme.colors;
    let (m, w) = (sb.margin(), sb.width());
    interior_header(sb, &slide.title, 1.1)?;

    let gap = 0.35;
    let start_x = m + 0.3;
    let shown = slide
        .members
        .len()
        .min(sb.options().max_team_members)
        .min(row_capacity(w - start_x - m, gap, MIN_TEAM_CARD_WIDTH));
    if shown < slide.members.len() {
        log::debug!(
            "Team slide shows {} of {} members",
            shown,
            slide.members.len()
        );
    }

    let y = 2.3;
    let card_h = 4.2;
    let card_w = if shown > 0 {
        let fitted = (w - start_x - m - gap * (shown - 1) as f64) / shown as f64;
        fitted.min(2.7)
    } else {
        2.7
    };
    let accents = [
        colors.primary_bright,
        colors.primary_dark,
        colors.accent_alt,
        colors.accent,
    ];

    for (i, member) in slide.members.iter().take(shown).enumerate() {
        let x = start_x + i as f64 * (card_w + gap);
        sb.add_card(x, y, card_w, card_h, Card::default())?;

        let avatar = 1.4;
        sb.add_badge(
            x + (card_w - avatar) / 2.0,
            y + 0.4,
            avatar,
            rotate(&accents, i),
            Run::new("\u{1F464}").size(28.0),
        )?;

        let name = member
            .name
            .clone()
            .unwrap_or_else(|| format!("Team Member {}", i + 1));
        sb.add_body(
            &name,
            TextOptions::at(x + 0.2, y + 2.1, card_w - 0.4, 0.4)
                .size(16.0)
                .color(colors.primary_dark)
                .bold(true)
                .align(Align::Center),
        )?;

        let role = member.role.as_deref().unwrap_or("Role / Title");
        sb.add_body(
            role,
            TextOptions::at(x + 0.2, y + 2.6, card_w - 0.4, 0.3)
                .size(12.0)
                .color(colors.primary_bright)
                .align(Align::Center),
        )?;

        if let Some(bio) = member.bio.as_deref().filter(|b| !b.is_empty()) {
            sb.add_body(
                bio,
                TextOptions::at(x + 0.2, y + 3.1, card_w - 0.4, 0.8)
                    .size(11.0)
                    .color(colors.gray)
                    .align(Align::Center),
            )?;
        }
    }

    footer(sb)
}

pub fn render_case_study(sb: &mut SlideBuilder<'_>, slide: &CaseStudySlide) -> Result<()> {
    let colors = &sb.theme().colors;
    let m = sb.margin();
    interior_header(sb, &slide.title, 1.1)?;

    let (col_w, col_h, gap) = (3.7, 4.0, 0.4);
    let start_x = m + 0.15;
    let y = 2.5;
    let columns = [
        ("Challenge", colors.accent, "\u{26A1}", &slide.challenge),
        ("Solution", colors.primary_bright, "\u{1F527}", &slide.solution),
        ("Results", colors.accent_alt, "\u{1F4C8}", &slide.results),
    ];

    for (i, (label, accent, icon, body)) in columns.into_iter().enumerate() {
        let x = start_x + i as f64 * (col_w + gap);
        sb.add_card(x, y, col_w, col_h, Card::default())?;
        sb.add_accent_bar(x, y, col_w, 0.07, Some(accent))?;
        sb.add_badge(x + 0.3, y + 0.4, 0.6, accent, Run::new(icon).size(18.0))?;
        sb.add_body(
            label,
            TextOptions::at(x + 0.3, y + 1.2, col_w - 0.6, 0.4)
                .size(20.0)
                .color(colors.primary_dark)
                .bold(true),
        )?;
        sb.add_body(
            body,
            TextOptions::at(x + 0.3, y + 1.8, col_w - 0.6, 1.8)
                .size(13.0)
                .color(colors.gray),
        )?;
    }

    footer(sb)
}

pub fn render_closing(sb: &mut SlideBuilder<'_>, slide: &ClosingSlide) -> Result<()> {
    let colors = &sb.theme().colors;
    let (m, w, h) = (sb.margin(), sb.width(), sb.height());

    sb.add_gradient_rect(0.0, 0.0, w, h, colors.primary_dark, colors.primary_bright, 135.0)?;
    for (x, y, size, color, alpha) in [
        (1.5, 1.0, 1.5, colors.accent_alt, 15.0),
        (10.5, 5.5, 2.0, colors.accent, 12.0),
        (11.0, 1.5, 0.8, colors.primary_bright, 20.0),
    ] {
        sb.add_dot(x, y, size, color, Some(alpha))?;
    }

    sb.add_title(
        &slide.title,
        TextOptions::at(m, 2.0, 12.0, 1.5)
            .size(56.0)
            .color(Color::WHITE)
            .align(Align::Center),
    )?;

    let subtitle = slide
        .subtitle
        .as_deref()
        .unwrap_or("Questions? Let's discuss.");
    if !subtitle.is_empty() {
        sb.add_body(
            subtitle,
            TextOptions::at(m, 3.6, 12.0, 0.8)
                .size(22.0)
                .color(colors.primary_bright)
                .align(Align::Center),
        )?;
    }

    let cta = slide.cta_text.as_deref().unwrap_or("Contact Us");
    let button_w = 2.8;
    sb.add_button(
        cta,
        (w - button_w) / 2.0,
        4.8,
        ButtonOptions {
            width: Some(button_w),
            fill: Some(Color::WHITE),
            text: Some(colors.primary_dark),
            ..Default::default()
        },
    )?;

    if let Some(contact) = slide.contact.as_deref().filter(|c| !c.is_empty()) {
        sb.add_body(
            contact,
            TextOptions::at(m, 5.8, 12.0, 0.5)
                .size(14.0)
                .color(Color::WHITE)
                .align(Align::Center),
        )?;
    }

    sb.add_logo(LogoVariant::White, Placement::LowerCenter, 2.2, 0.55)?;
    Ok(())
}

pub fn render_blank(sb: &mut SlideBuilder<'_>, _slide: &BlankSlide) -> Result<()> {
    sb.set_background(Color::WHITE);
    sb.add_logo(LogoVariant::Colored, Placement::UpperLeft, 1.8, 0.45)?;
    Ok(())
}
