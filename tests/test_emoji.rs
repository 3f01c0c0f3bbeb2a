mod common;

use std::sync::Arc;

use common::Recorder;
use riposte::builder::EditEmoji;
use riposte::http::{LightMethod, RequestHandler};
use riposte::json::{from_value, json, Value};
use riposte::model::guild::{Emoji, EmojiUpdate};
use riposte::model::id::{EmojiId, GuildId, RoleId, UserId};
use riposte::model::Timestamp;

const GUILD_ID: u64 = 290926798626357999;
const EMOJI_ID: u64 = 41771983429993937;

fn emoji_data() -> Value {
    json!({
        "id": EMOJI_ID.to_string(),
        "name": "LUL",
        "roles": ["41771983429993000", "41771983429993111"],
        "user": {
            "username": "Luigi",
            "discriminator": "0002",
            "id": "96008815106887111",
            "avatar": "5500909a3274e1812beb4e8de6631111",
        },
        "require_colons": true,
        "managed": false,
        "animated": false,
    })
}

fn emoji(recorder: &Arc<Recorder>, data: Value) -> Emoji {
    Emoji::new(GuildId::new(GUILD_ID), Arc::clone(recorder) as Arc<dyn RequestHandler>, data)
        .unwrap()
}

#[test]
fn construction_mirrors_the_data() {
    let recorder = Recorder::new();
    let emoji = emoji(&recorder, emoji_data());

    assert_eq!(emoji.id, EmojiId::new(EMOJI_ID));
    assert_eq!(emoji.guild_id(), GuildId::new(GUILD_ID));
    assert_eq!(emoji.name.as_deref(), Some("LUL"));
    assert_eq!(
        emoji.roles,
        Some(vec![RoleId::new(41771983429993000), RoleId::new(41771983429993111)])
    );
    assert_eq!(emoji.user.as_ref().unwrap().id, UserId::new(96008815106887111));
    assert_eq!(emoji.require_colons, Some(true));
    assert_eq!(emoji.managed, Some(false));
    assert_eq!(emoji.available, None);
}

#[test]
fn missing_id_is_rejected() {
    let recorder = Recorder::new();
    let result = Emoji::new(
        GuildId::new(GUILD_ID),
        recorder as Arc<dyn RequestHandler>,
        json!({"name": "LUL"}),
    );

    assert!(result.is_err());
}

#[test]
fn update_is_sparse() {
    let recorder = Recorder::new();
    let mut emoji = emoji(&recorder, emoji_data());

    emoji.update(from_value(json!({"name": "KEKW", "available": false})).unwrap());

    assert_eq!(emoji.name.as_deref(), Some("KEKW"));
    assert_eq!(emoji.available, Some(false));
    assert_eq!(emoji.require_colons, Some(true));
    assert!(emoji.user.is_some());
    assert_eq!(emoji.roles.as_ref().map(Vec::len), Some(2));
}

#[test]
fn update_with_null_clears() {
    let recorder = Recorder::new();
    let mut emoji = emoji(&recorder, emoji_data());

    let update: EmojiUpdate = from_value(json!({"user": null})).unwrap();
    assert_eq!(update.user, Some(None));
    emoji.update(update);

    assert!(emoji.user.is_none());
    assert_eq!(emoji.name.as_deref(), Some("LUL"));
}

#[test]
fn update_is_idempotent() {
    let recorder = Recorder::new();
    let mut emoji = emoji(&recorder, emoji_data());
    let before = emoji.to_json().unwrap();

    let update: EmojiUpdate = from_value(emoji_data()).unwrap();
    emoji.update(update.clone());
    emoji.update(update);

    assert_eq!(emoji.to_json().unwrap(), before);
}

#[test]
fn format_and_url() {
    let recorder = Recorder::new();
    let mut emoji = emoji(&recorder, emoji_data());

    assert_eq!(emoji.format(), format!("<:LUL:{EMOJI_ID}>"));
    assert_eq!(emoji.to_string(), emoji.format());
    assert_eq!(emoji.url(), format!("https://cdn.discordapp.com/emojis/{EMOJI_ID}.png"));

    emoji.update(from_value(json!({"animated": true})).unwrap());

    assert_eq!(emoji.format(), format!("<a:LUL:{EMOJI_ID}>"));
    assert_eq!(emoji.url(), format!("https://cdn.discordapp.com/emojis/{EMOJI_ID}.gif"));
}

#[test]
fn to_json_includes_creation_time() {
    let recorder = Recorder::new();
    let emoji = emoji(&recorder, json!({"id": EMOJI_ID.to_string(), "name": "LUL"}));

    let value = emoji.to_json().unwrap();

    assert_eq!(value["id"], json!(EMOJI_ID.to_string()));
    assert_eq!(value["name"], json!("LUL"));
    assert_eq!(value["created_at"], json!(emoji.created_at().to_string()));
    let created_at = Timestamp::parse(value["created_at"].as_str().unwrap()).unwrap();
    assert_eq!(created_at, emoji.created_at());
    assert!(value.get("roles").is_none());
    assert!(value.get("http").is_none());
}

#[test]
fn equality_is_by_id() {
    let recorder = Recorder::new();
    let a = emoji(&recorder, emoji_data());
    let b = emoji(&recorder, json!({"id": EMOJI_ID.to_string()}));

    assert_eq!(a, b);
    assert_eq!(EmojiId::from(&a), EmojiId::new(EMOJI_ID));
}

#[tokio::test]
async fn delete_sends_the_reason() {
    let recorder = Recorder::new();
    let emoji = emoji(&recorder, emoji_data());

    let response = emoji.delete(Some("cleanup")).await.unwrap();

    assert_eq!(response, Value::Null);
    let request = recorder.single();
    assert_eq!(request.method, LightMethod::Delete);
    assert_eq!(request.path, format!("/guilds/{GUILD_ID}/emojis/{EMOJI_ID}"));
    assert_eq!(request.body, None);
    assert_eq!(request.audit_log_reason.as_deref(), Some("cleanup"));
}

#[tokio::test]
async fn edit_returns_the_raw_emoji() {
    let recorder = Recorder::new();
    recorder.respond_with(Ok(json!({"id": EMOJI_ID.to_string(), "name": "blobuwu"})));
    let mut emoji = emoji(&recorder, emoji_data());

    let raw = emoji.edit(EditEmoji::new().name("blobuwu")).await.unwrap();

    let request = recorder.single();
    assert_eq!(request.method, LightMethod::Patch);
    assert_eq!(request.path, format!("/guilds/{GUILD_ID}/emojis/{EMOJI_ID}"));
    assert_eq!(request.body, Some(json!({"name": "blobuwu"})));
    assert_eq!(request.audit_log_reason, None);
    assert_eq!(emoji.name.as_deref(), Some("LUL"));

    emoji.update(from_value(raw).unwrap());
    assert_eq!(emoji.name.as_deref(), Some("blobuwu"));
}
