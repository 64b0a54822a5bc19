use super::*;
use time::macros::date;
use uuid::Uuid;

const TODAY: Date = date!(2024 - 06 - 10);

fn item(name: &str, expiry: Option<Date>) -> Ingredient {
    Ingredient {
        id: Uuid::new_v4(),
        name: name.into(),
        quantity: 2.0,
        unit: "개".into(),
        purchase_date: None,
        expiry_date: expiry,
        location: "냉장고".into(),
        category: "채소".into(),
    }
}

#[test]
fn empty_list_renders_placeholder() {
    assert_eq!(render_ingredients(&[], TODAY, 3, Locale::En), "Nothing here yet.\n");
}

#[test]
fn rows_carry_markers_and_countdowns() {
    let items = [
        item("우유", Some(date!(2024 - 06 - 08))),
        item("두부", Some(date!(2024 - 06 - 12))),
        item("양파", Some(date!(2024 - 06 - 30))),
        item("소금", None),
    ];
    let out = render_ingredients(&items, TODAY, 3, Locale::Ko);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[1].starts_with("✖ 우유") && lines[1].ends_with("D+2"));
    assert!(lines[2].starts_with("⚠ 두부") && lines[2].ends_with("D-2"));
    assert!(lines[3].starts_with("✔ 양파") && lines[3].ends_with("D-20"));
    assert!(lines[4].starts_with("· 소금") && lines[4].ends_with("기한 없음"));
    assert!(lines[2].contains("2 개"));
}

#[test]
fn columns_line_up_with_wide_names() {
    let items = [item("파", Some(TODAY)), item("Worcestershire", Some(TODAY))];
    let out = render_ingredients(&items, TODAY, 3, Locale::En);
    let positions: Vec<usize> = out.lines().skip(1).map(|l| display_width(&l[..l.find("2024").unwrap()])).collect();
    assert_eq!(positions[0], positions[1]);
}

#[test]
fn detail_shows_status_label() {
    let out = render_ingredient(&item("두부", Some(TODAY)), TODAY, 3, Locale::En);
    assert!(out.starts_with("⚠ 두부 (2 개)"));
    assert!(out.contains("Expires: 2024-06-10 (D-Day) [Expiring soon]"));
    assert!(out.contains("Category: 채소"));
}
