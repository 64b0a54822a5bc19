use super::*;
use serde_json::json;

#[test]
fn plain_text_reply_is_shown_verbatim() {
    let reply = AiReply { text: "  물을 먼저 끓이세요.\n".into(), model: "gpt-4o-mini".into(), ..AiReply::default() };
    let out = render_ai_reply(&reply, Locale::Ko);
    assert!(out.starts_with("물을 먼저 끓이세요.\n"));
    assert!(out.ends_with("[모델: gpt-4o-mini]\n"));
}

#[test]
fn structured_recipes_are_listed() {
    let reply = AiReply {
        text: "[...]".into(),
        structured: Some(json!([
            { "name": "김치볶음밥", "cooking_time": 15, "difficulty": "쉬움", "ingredients": ["김치", "밥"] },
            { "name": "계란국" }
        ])),
        ..AiReply::default()
    };
    let out = render_ai_reply(&reply, Locale::En);
    assert!(out.starts_with("Suggested recipes\n"));
    assert!(out.contains("1. 김치볶음밥 (15min, 쉬움)"));
    assert!(out.contains("   김치, 밥"));
    assert!(out.contains("2. 계란국\n"));
    assert!(!out.contains("[...]"));
    assert!(!out.contains("Model"));
}

#[test]
fn object_payload_falls_back_to_text() {
    let reply = AiReply { text: "식단표".into(), structured: Some(json!({ "day1": {} })), ..AiReply::default() };
    assert_eq!(render_ai_reply(&reply, Locale::Ko), "식단표\n");
}

fn onion() -> RecognizedIngredient {
    RecognizedIngredient {
        name: "양파".into(),
        quantity: Some(2.0),
        unit: "개".into(),
        category: "채소".into(),
        estimated_expiry_days: Some(14),
    }
}

#[test]
fn recognized_line_skips_unknown_parts() {
    assert_eq!(recognized_line(&onion()), "양파 2 개 채소 +14d");
    let bare = RecognizedIngredient { quantity: None, unit: String::new(), category: String::new(), estimated_expiry_days: None, ..onion() };
    assert_eq!(recognized_line(&bare), "양파");
}

#[test]
fn recognized_list_shows_confidence_and_model() {
    let found = RecognizedIngredients { ingredients: vec![onion()], confidence: 7.5, model: "vision".into() };
    let out = render_recognized(&found, Locale::En);
    assert_eq!(out, "1. 양파 2 개 채소 +14d\nConfidence: 7.5/10\n[Model: vision]\n");
}

#[test]
fn nothing_recognized_says_so() {
    let out = render_recognized(&RecognizedIngredients::default(), Locale::Ko);
    assert_eq!(out, "사진에서 재료를 찾지 못했습니다.\n");
}
