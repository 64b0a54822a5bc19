use super::*;
use time::macros::date;

const TODAY: Date = date!(2024 - 06 - 10);

#[test]
fn every_panel_renders_its_own_title() {
    let data = PanelData::default();
    for panel in Panel::ALL {
        let out = render_panel(panel, &data, Locale::En, TODAY);
        let title = Locale::En.text(panel.title_key());
        assert!(out.starts_with(&format!("== {title} ==")), "{panel}: {out}");
        for other in Panel::ALL.into_iter().filter(|p| *p != panel) {
            assert!(!out.contains(&format!("== {} ==", Locale::En.text(other.title_key()))));
        }
    }
}

#[test]
fn dashboard_panel_uses_stats() {
    let data = PanelData { stats: Some(DashboardStats { total: 2, fresh: 2, ..DashboardStats::default() }), ..PanelData::default() };
    let out = render_panel(Panel::Dashboard, &data, Locale::Ko, TODAY);
    assert!(out.starts_with("== 대시보드 =="));
    assert!(out.contains("전체: 2"));
    assert_eq!(out.matches("== 대시보드 ==").count(), 1);
}

#[test]
fn ai_panels_show_reply_or_placeholder() {
    let empty = render_panel(Panel::Price, &PanelData::default(), Locale::Ko, TODAY);
    assert_eq!(empty, "== 가격 정보 ==\n항목이 없습니다.\n");

    let data = PanelData { ai_reply: Some(AiReply { text: "양파 1kg 약 3000원".into(), ..AiReply::default() }), ..PanelData::default() };
    let out = render_panel(Panel::Price, &data, Locale::Ko, TODAY);
    assert!(out.contains("양파 1kg 약 3000원"));
}

#[test]
fn meal_plan_panel_lists_saved_plans_after_reply() {
    let data = PanelData { ai_reply: Some(AiReply { text: "3일 식단".into(), ..AiReply::default() }), ..PanelData::default() };
    let out = render_panel(Panel::MealPlan, &data, Locale::En, TODAY);
    let reply = out.find("3일 식단").unwrap();
    let saved = out.find("Planned meals").unwrap();
    assert!(reply < saved);
}
