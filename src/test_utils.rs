//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパーを提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::VecDeque;
use std::sync::Mutex;

use reqwest::StatusCode;
use serde_json::Value;
use tokio::time::Instant;

use crate::http::{
    HttpRequest,
    HttpResponse,
    Transport,
    TransportError,
};
use crate::i18n::Dictionary;

/// テスト用の Dictionary を作成する
///
/// # Panics
/// `value` がオブジェクトでない場合
pub(crate) fn dict(value: Value) -> Dictionary {
    Dictionary::from_value(value).unwrap()
}

/// `ScriptedTransport` が返す応答
#[derive(Debug, Clone)]
pub(crate) enum Scripted {
    /// 指定したステータスとボディを返す
    Respond { status: u16, body: String },
    /// ネットワークエラーを返す
    NetworkError,
    /// 応答せずに待ち続ける（タイムアウトの検証用）
    Hang,
}

impl Scripted {
    pub(crate) fn json(status: u16, value: &Value) -> Self {
        Self::Respond { status, body: value.to_string() }
    }

    pub(crate) fn status(status: u16) -> Self {
        Self::Respond { status, body: String::new() }
    }

    pub(crate) fn body(status: u16, body: &str) -> Self {
        Self::Respond { status, body: body.to_string() }
    }
}

/// 送信されたリクエストと送信時刻
#[derive(Debug, Clone)]
pub(crate) struct Call {
    pub(crate) request: HttpRequest,
    pub(crate) at: Instant,
}

/// 事前に用意した応答を順番に返す Transport
///
/// 用意した応答を使い切った後は `NetworkError` を返す。
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub(crate) fn new(script: Vec<Scripted>) -> Self {
        Self { script: Mutex::new(script.into()), calls: Mutex::new(Vec::new()) }
    }

    /// これまでに送信されたリクエスト
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push(Call { request, at: Instant::now() });
        let next = self.script.lock().unwrap().pop_front().unwrap_or(Scripted::NetworkError);

        match next {
            Scripted::Respond { status, body } => Ok(HttpResponse {
                status: StatusCode::from_u16(status).unwrap(),
                body: body.into_bytes(),
            }),
            Scripted::NetworkError => Err(TransportError::Other("connection reset".to_string())),
            Scripted::Hang => std::future::pending().await,
        }
    }
}
