//! サンプルルール
//!
//! よくある契約審査意見を元にした10件の雛形。

use crate::types::CanonicalRule;

const SAMPLE_RULES: [[&str; 8]; 10] = [
    [
        "通用合同", "Neutral", "high",
        "付款方式;支付周期;付款条件",
        r"支付.*\d+.*天",
        "1. 确认付款方式\n2. 明确付款周期\n3. 设定逾期责任",
        "建议明确指定付款方式和周期",
        "建议要求提高付款保障机制",
    ],
    [
        "采购;外包", "Neutral", "high",
        "违约责任;赔偿;违约金",
        r"违约.*赔偿.*\d+",
        "1. 明确违约责任\n2. 设定赔偿标准\n3. 平衡双方责任",
        "建议设定合理的违约金比例",
        "建议要求明确违约情形和责任",
    ],
    [
        "技术服务;外包", "Neutral", "high",
        "知识产权;技术成果;著作权",
        r"知识产权.*归属",
        "1. 明确知识产权归属\n2. 区分项目代码和通用技术\n3. 设定使用许可条款",
        "建议明确开发成果归属权",
        "建议保护技术投入和知识产权",
    ],
    [
        "通用合同", "Neutral", "medium",
        "保密;商业秘密;机密信息",
        r"保密.*\d+.*年",
        "1. 定义保密信息范围\n2. 设定保密期限\n3. 明确违约责任",
        "建议明确商业秘密定义",
        "建议设定具体违约金额",
    ],
    [
        "技术服务;采购", "Neutral", "medium",
        "交付;验收;完成标准",
        r"交付.*验收.*标准",
        "1. 制定验收标准\n2. 设定验收时限\n3. 明确不合格处理",
        "建议制定详细验收标准",
        "建议设定合理验收时限",
    ],
    [
        "通用合同", "Neutral", "medium",
        "终止;解除;合同期限",
        r"终止.*\d+.*天.*通知",
        "1. 明确终止情形\n2. 设定通知期限\n3. 规定交接程序",
        "建议明确终止条件",
        "建议设定终止通知期限",
    ],
    [
        "技术服务", "Neutral", "medium",
        "数据安全;隐私保护;加密",
        r"数据.*安全.*加密",
        "1. 明确数据分类\n2. 规定加密要求\n3. 设定备份程序",
        "建议明确数据保护等级",
        "建议要求数据安全措施",
    ],
    [
        "通用合同", "Neutral", "low",
        "不可抗力;天灾;force majeure",
        r"不可抗力.*\d+.*天",
        "1. 定义不可抗力情形\n2. 设定通知义务\n3. 规定损失分担",
        "建议明确不可抗力范围",
        "建议设定通知程序",
    ],
    [
        "通用合同", "Neutral", "low",
        "争议;仲裁;诉讼;管辖",
        r"争议.*仲裁.*管辖",
        "1. 选择争议解决方式\n2. 明确管辖法院\n3. 设定前置程序",
        "建议增加仲裁选项",
        "建议明确管辖法院",
    ],
    [
        "技术服务;外包", "Neutral", "low",
        "沟通;联系;报告;通知",
        r"沟通.*报告.*频率",
        "1. 明确沟通方式\n2. 设定报告频率\n3. 规定紧急联系",
        "建议明确沟通机制",
        "建议设定项目报告制度",
    ],
];

/// サンプルルールを取得
pub fn sample_rules() -> Vec<CanonicalRule> {
    SAMPLE_RULES
        .iter()
        .map(|values| CanonicalRule::from_values(&values[..]))
        .collect()
}
