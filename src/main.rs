use anyhow::Result;
use qti_question_import::{logger, App, Config};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置：QTI_CONFIG 指定的 TOML 文件优先，否则只用环境变量
    let mut config = match std::env::var("QTI_CONFIG") {
        Ok(path) => Config::from_toml_file(Path::new(&path))?,
        Err(_) => Config::from_env(),
    };

    // 第一个参数可覆盖输入文件
    if let Some(xml_path) = std::env::args().nth(1) {
        config.xml_path = xml_path;
    }

    // 初始化并运行应用
    App::initialize(config)?.run().await?;

    Ok(())
}
