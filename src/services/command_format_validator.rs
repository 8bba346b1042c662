// コマンド命名規約バリデーター
//
// 登録済みコマンドのクラス名・コマンド名・サービス名が、
// ドメインとアクションから導出される命名規約に従っているかを検証します。
// 違反ごとに診断メッセージを蓄積し、テストスイートから一括で参照されます。

use crate::core::naming;
use crate::core::registry::CommandDescriptor;
use regex::Regex;

/// コマンド命名規約バリデーター
///
/// 検証失敗の診断メッセージをインスタンス内に蓄積します。
/// メッセージは `clear` を呼ぶまで呼び出しをまたいで保持されます。
#[derive(Debug, Clone)]
pub struct CommandFormatValidator {
    /// 蓄積された診断メッセージ
    validation_messages: Vec<String>,
}

impl CommandFormatValidator {
    /// 新しいCommandFormatValidatorを作成
    pub fn new() -> Self {
        Self {
            validation_messages: Vec::new(),
        }
    }

    /// コマンドの命名を検証
    ///
    /// # Arguments
    ///
    /// * `command_domain` - ドメイン（例: Configuration）
    /// * `command_class_name` - コマンドクラス名（例: ConfigurationExport）
    /// * `command_name` - コマンド名（例: fop:configuration:export）
    /// * `command_service_name` - サービス名（例: fop.console.configuration.export.command）
    ///
    /// # Returns
    ///
    /// すべての規約を満たす場合はtrue。最初の違反で打ち切り、
    /// 診断メッセージを1件追加してfalseを返します。
    pub fn validate(
        &mut self,
        command_domain: &str,
        command_class_name: &str,
        command_name: &str,
        command_service_name: &str,
    ) -> bool {
        if command_domain.is_empty() {
            self.add_validation_message(command_class_name, "Domain can't be empty.");

            return false;
        }

        if !command_class_name.starts_with(command_domain) {
            self.add_validation_message(
                command_class_name,
                &format!(
                    "Domain {} must be included in command class name.",
                    command_domain
                ),
            );

            return false;
        }

        // 先頭のドメインプレフィックスのみを取り除く
        let command_action = &command_class_name[command_domain.len()..];

        if command_action.is_empty() {
            self.add_validation_message(command_class_name, "Action can't be empty.");

            return false;
        }

        let command_domain = capitalize_first(command_domain);
        let command_action = capitalize_first(command_action);

        if !self.is_command_name_valid(
            command_class_name,
            command_name,
            &command_domain,
            &command_action,
        ) {
            return false;
        }

        if !self.is_command_service_name_valid(
            command_class_name,
            command_service_name,
            &command_domain,
            &command_action,
        ) {
            return false;
        }

        true
    }

    /// コマンド記述子を検証
    pub fn validate_descriptor(&mut self, descriptor: &CommandDescriptor) -> bool {
        self.validate(
            &descriptor.domain,
            &descriptor.class_name,
            &descriptor.command_name,
            &descriptor.service_name,
        )
    }

    /// コマンド名の検証
    ///
    /// 期待パターン: fop:command-domain:command[:-]action
    fn is_command_name_valid(
        &mut self,
        command_class_name: &str,
        command_name: &str,
        command_domain: &str,
        command_action: &str,
    ) -> bool {
        let expected_command_name_pattern = format!(
            "{}:{}:{}",
            naming::COMMAND_NAMESPACE,
            split_words(command_domain).join("-"),
            split_words(command_action).join("[:-]"),
        )
        .to_lowercase();

        if !matches_anchored(&expected_command_name_pattern, command_name) {
            self.add_validation_message(
                command_class_name,
                &format!(
                    "Wrong format for command class name.\nExpected = {}\nActual = {}",
                    expected_command_name_pattern, command_name
                ),
            );

            return false;
        }

        true
    }

    /// サービス名の検証
    ///
    /// 期待パターン: fop.console.command_domain.command[\._]action.command
    fn is_command_service_name_valid(
        &mut self,
        command_class_name: &str,
        command_service_name: &str,
        command_domain: &str,
        command_action: &str,
    ) -> bool {
        let expected_command_service_name_pattern = format!(
            "{}.{}.{}.command",
            naming::SERVICE_PREFIX,
            split_words(command_domain).join("_"),
            split_words(command_action).join(r"[\._]"),
        )
        .to_lowercase();

        if !matches_anchored(&expected_command_service_name_pattern, command_service_name) {
            self.add_validation_message(
                command_class_name,
                &format!(
                    "Wrong format for command service name.\nExpected = {}\nActual = {}",
                    expected_command_service_name_pattern, command_service_name
                ),
            );

            return false;
        }

        true
    }

    /// 診断メッセージを追加
    fn add_validation_message(&mut self, command: &str, message: &str) {
        self.validation_messages
            .push(format!("[{}] => {}", command, message));
    }

    /// 蓄積された診断メッセージを取得
    pub fn validation_messages(&self) -> &[String] {
        &self.validation_messages
    }

    /// 蓄積された診断メッセージを破棄
    pub fn clear(&mut self) {
        self.validation_messages.clear();
    }
}

impl Default for CommandFormatValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// アンカー付きパターンで全体一致を判定
///
/// 単語はエスケープせずにパターンへ展開される。正規表現のメタ文字を
/// 含む単語はパターンのコンパイルに失敗し、その場合は不一致として扱う。
fn matches_anchored(pattern: &str, value: &str) -> bool {
    match Regex::new(&format!("^{}$", pattern)) {
        Ok(regex) => regex.is_match(value),
        Err(_) => false,
    }
}

/// 大文字境界で単語に分割
///
/// "ModuleHooks" は ["Module", "Hooks"] になる。
/// 連続する大文字はそれぞれ新しい単語を開始する。
fn split_words(subject: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    for ch in subject.chars() {
        if ch.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// 先頭文字を大文字化
fn capitalize_first(subject: &str) -> String {
    let mut chars = subject.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
