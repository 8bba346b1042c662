// コマンドレジストリ
//
// このバイナリが提供するコマンドの登録情報（ドメイン・クラス名・
// コマンド名・サービス名）を保持します。命名規約バリデーターは
// このレジストリを走査して全コマンドを検証します。

/// コマンド記述子
///
/// 登録済みコマンド1件分の命名情報。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// コマンドドメイン（例: Configuration）
    pub domain: String,
    /// コマンドクラス名（例: ConfigurationExport）
    pub class_name: String,
    /// コマンド名（例: fop:configuration:export）
    pub command_name: String,
    /// サービス名（例: fop.console.configuration.export.command）
    pub service_name: String,
}

impl CommandDescriptor {
    /// 新しいCommandDescriptorを作成
    pub fn new(
        domain: impl Into<String>,
        class_name: impl Into<String>,
        command_name: impl Into<String>,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            class_name: class_name.into(),
            command_name: command_name.into(),
            service_name: service_name.into(),
        }
    }
}

/// 登録済みコマンドのレジストリ
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    descriptors: Vec<CommandDescriptor>,
}

impl CommandRegistry {
    /// 空のレジストリを作成
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    /// このバイナリが提供するコマンドのレジストリを作成
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register(CommandDescriptor::new(
            "Configuration",
            "ConfigurationExport",
            "fop:configuration:export",
            "fop.console.configuration.export.command",
        ));
        registry.register(CommandDescriptor::new(
            "Configuration",
            "ConfigurationImport",
            "fop:configuration:import",
            "fop.console.configuration.import.command",
        ));

        registry
    }

    /// コマンドを登録
    pub fn register(&mut self, descriptor: CommandDescriptor) {
        self.descriptors.push(descriptor);
    }

    /// 登録済みコマンドの一覧を取得
    pub fn descriptors(&self) -> &[CommandDescriptor] {
        &self.descriptors
    }

    /// 登録済みコマンドの数を取得
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// レジストリが空かどうか
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
