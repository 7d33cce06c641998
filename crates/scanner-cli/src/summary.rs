use console::Style;
use scanner_core::presenter::{ResultAction, ResultView};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    format: Style,
    link: Style,
    action: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            format: Style::new().green(),
            link: Style::new().underlined().blue(),
            action: Style::new().dim().yellow(),
        }
    }
}

pub fn print_result(view: &ResultView) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Scan Result"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(11)));
    println!(
        "  {:<10}{}",
        s.label.apply_to("Format"),
        s.format.apply_to(&view.format)
    );
    match &view.open_url {
        Some(url) => println!("  {:<10}{}", s.label.apply_to("Content"), s.link.apply_to(url)),
        None => println!(
            "  {:<10}{}",
            s.label.apply_to("Content"),
            s.value.apply_to(&view.content)
        ),
    }
    println!(
        "  {:<10}{}",
        s.label.apply_to("Scanned"),
        s.value.apply_to(&view.scanned_at)
    );

    let actions: Vec<String> = view
        .actions()
        .iter()
        .filter(|a| !matches!(a, ResultAction::ScanAgain))
        .map(|a| a.to_string())
        .collect();
    println!(
        "  {:<10}{}",
        s.label.apply_to("Actions"),
        s.action.apply_to(actions.join(", "))
    );
    println!();
}

pub fn print_tips(tips: &[&str]) {
    if tips.is_empty() {
        return;
    }
    let s = Styles::new();
    println!("  {}", s.title.apply_to("Scanning tips"));
    for tip in tips {
        println!("    {} {}", s.label.apply_to("\u{2022}"), tip);
    }
    println!();
}
