//! Reply and alert texts.

use serde_json::Value;

use crate::model::{AlertPayload, UserRecord};

/// Literal that starts (or restarts) registration.
pub const REGISTER_COMMAND: &str = "登録";

/// Literal that asks for the current registration summary.
pub const STATUS_COMMAND: &str = "状態";

/// Rendered in place of a missing alert field or record field.
pub const MISSING_VALUE: &str = "不明";

pub const NAME_PROMPT: &str = "登録を開始します。\nお名前を教えてください。";

pub const NOT_REGISTERED: &str = "まだ登録されていません。\n「登録」と送信して登録してください。";

pub const HELP_TEXT: &str = "コマンド一覧:\n・登録: 新規登録\n・状態: 現在の状態確認";

const RULE: &str = "━━━━━━━━━━━━━━━";

pub fn location_prompt(name: &str) -> String {
    format!("{name}さん、ありがとうございます。\n次に作業場所を教えてください。")
}

pub fn registration_complete(record: &UserRecord) -> String {
    format!(
        "登録完了しました！\n\n名前: {}\n場所: {}\n\n監視を開始します。",
        field(&record.name),
        field(&record.location),
    )
}

pub fn status_summary(record: &UserRecord) -> String {
    format!(
        "【現在の状態】\n名前: {}\n場所: {}\n\n監視中です。",
        field(&record.name),
        field(&record.location),
    )
}

/// Compose the heat-stroke warning pushed to `recipient`.
pub fn alert_message(recipient: &UserRecord, alert: &AlertPayload) -> String {
    format!(
        "🚨 熱中症警報 🚨\n\
         \n\
         作業者: {name}\n\
         場所: {location}\n\
         \n\
         {RULE}\n\
         📊 環境データ\n\
         {RULE}\n\
         気温: {temperature}℃\n\
         湿度: {humidity}%\n\
         不快指数: {di}\n\
         \n\
         ⚠️ リスクレベル: {risk}\n\
         ⏱️ 継続時間: {duration}分\n\
         \n\
         {RULE}\n\
         💡 推奨対応\n\
         {RULE}\n\
         • すぐに日陰で休憩\n\
         • 水分・塩分を補給\n\
         • 涼しい場所へ移動\n\
         • 体調確認\n\
         \n\
         {RULE}\n",
        name = field(&recipient.name),
        location = field(&recipient.location),
        temperature = render(alert.temperature.as_ref()),
        humidity = render(alert.humidity.as_ref()),
        di = render(alert.discomfort_index.as_ref()),
        risk = render(alert.risk_level.as_ref()),
        duration = render(alert.duration_minutes.as_ref()),
    )
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(MISSING_VALUE)
}

/// Render a loosely typed payload value for display.
fn render(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING_VALUE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
