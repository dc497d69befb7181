/// 文件名清洗
///
/// 只保留 ASCII 字母、数字、空格、`.`、`_`、`-`，其余字符（包括非 ASCII）直接丢弃，
/// 最后把空格替换为下划线。
///
/// 不限制长度，也不做冲突检测：两个不同的姓名清洗后相同时，后生成的文件会覆盖前一个。
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-'))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}
