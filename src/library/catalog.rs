use crate::library::profile::LibraryProfile;

/// An insertable snippet offered by the component sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub label: &'static str,
    pub code: &'static str,
}

const fn entry(label: &'static str, code: &'static str) -> CatalogEntry {
    CatalogEntry { label, code }
}

const V3: &[CatalogEntry] = &[
    entry("Text Input", r#"<Form.Item label="Text" name="text"><Input /></Form.Item>"#),
    entry("Password", r#"<Form.Item label="Password" name="password"><Input.Password /></Form.Item>"#),
    entry("Textarea", r#"<Form.Item label="Message" name="message"><Input.TextArea rows={4} /></Form.Item>"#),
    entry(
        "Select",
        r#"<Form.Item label="Select" name="select"><Select><Select.Option value="1">Option 1</Select.Option><Select.Option value="2">Option 2</Select.Option></Select></Form.Item>"#,
    ),
    entry("Date Picker", r#"<Form.Item label="Date" name="date"><DatePicker /></Form.Item>"#),
    entry("Time Picker", r#"<Form.Item label="Time" name="time"><TimePicker /></Form.Item>"#),
    entry("Range Picker", r#"<Form.Item label="Range" name="range"><DatePicker.RangePicker /></Form.Item>"#),
    entry("Checkbox", r#"<Form.Item name="agree" valuePropName="checked"><Checkbox>I agree</Checkbox></Form.Item>"#),
    entry(
        "Checkbox Group",
        r#"<Form.Item label="Options" name="checkGroup"><Checkbox.Group options={['A', 'B', 'C']} /></Form.Item>"#,
    ),
    entry(
        "Radio Group",
        r#"<Form.Item label="Options" name="radio"><Radio.Group><Radio value="1">One</Radio><Radio value="2">Two</Radio></Radio.Group></Form.Item>"#,
    ),
    entry("Switch", r#"<Form.Item label="Enable" name="enabled" valuePropName="checked"><Switch /></Form.Item>"#),
    entry(
        "Upload",
        r#"<Form.Item label="Upload" name="upload"><Upload fileList={[]}><Button>Click to Upload</Button></Upload></Form.Item>"#,
    ),
    entry("Slider", r#"<Form.Item label="Volume" name="volume"><Slider /></Form.Item>"#),
    entry("Rate", r#"<Form.Item label="Rate" name="rate"><Rate /></Form.Item>"#),
    entry(
        "Cascader",
        r#"<Form.Item label="Cascader" name="cascader"><Cascader options={[{ value: 'zhejiang', label: 'Zhejiang', children: [{ value: 'hangzhou', label: 'Hangzhou' }] }]} /></Form.Item>"#,
    ),
    entry(
        "TreeSelect",
        r#"<Form.Item label="Tree" name="tree"><TreeSelect treeData={[{ title: 'Node1', value: '0-0', key: '0-0' }]} /></Form.Item>"#,
    ),
    entry("InputNumber", r#"<Form.Item label="Number" name="number"><InputNumber /></Form.Item>"#),
    entry(
        "Mentions",
        r#"<Form.Item label="Mention" name="mention"><Mentions><Mentions.Option value="user1">@user1</Mentions.Option></Mentions></Form.Item>"#,
    ),
    entry(
        "AutoComplete",
        r#"<Form.Item label="Auto" name="auto"><AutoComplete options={[{ value: 'Option 1' }, { value: 'Option 2' }]} /></Form.Item>"#,
    ),
    entry(
        "Transfer",
        r#"<Form.Item label="Transfer"><Transfer dataSource={[{ key: '1', title: 'Item 1' }, { key: '2', title: 'Item 2' }]} targetKeys={[]} render={item => item.title} /></Form.Item>
<Form.Item name="transfer" hidden><Input /></Form.Item>"#,
    ),
    entry("Search", r#"<Form.Item label="Search" name="search"><Input.Search placeholder="Search..." /></Form.Item>"#),
    entry("Submit", r#"<Form.Item><Button type="primary" htmlType="submit">Submit</Button></Form.Item>"#),
];

const V4_EXTRA: &[CatalogEntry] = &[
    entry("Form Item", r#"<Form.Item label="Generic" name="generic"><Input /></Form.Item>"#),
    entry(
        "Input Group",
        r#"<Form.Item label="Group" name="group"><Space.Compact style={{ display: 'flex' }}><Input style={{ width: '50%' }} /><Input style={{ width: '50%' }} /></Space.Compact></Form.Item>"#,
    ),
    entry(
        "Descriptions",
        r#"<Descriptions title="User Info"><Descriptions.Item label="Name">John</Descriptions.Item></Descriptions>"#,
    ),
    entry("Steps", r#"<Steps current={1}><Steps.Step title="Step 1" /><Steps.Step title="Step 2" /></Steps>"#),
];

const V5_EXTRA: &[CatalogEntry] = &[
    entry("Color Picker", r#"<Form.Item label="Color" name="color"><ColorPicker /></Form.Item>"#),
    entry("Segmented", r#"<Form.Item label="Segmented" name="segment"><Segmented options={['A', 'B']} /></Form.Item>"#),
    entry("Tour", r#"<Tour open={false} steps={[{ title: 'Step 1', description: 'Do something' }]} />"#),
    entry("Float Button", r#"<FloatButton />"#),
    entry("Watermark", r#"<Watermark content="Demo"><div style={{ height: 100 }}>Watermarked</div></Watermark>"#),
    entry("QRCode", r#"<QRCode value="https://ant.design" />"#),
    entry(
        "Image Preview Group",
        r#"<Image.PreviewGroup><Image src="https://via.placeholder.com/150" /><Image src="https://via.placeholder.com/150" /></Image.PreviewGroup>"#,
    ),
];

/// Snippets available for a profile, in sidebar order.
pub fn catalog(profile: LibraryProfile) -> Vec<CatalogEntry> {
    let mut entries: Vec<CatalogEntry> = V3.to_vec();
    if profile >= LibraryProfile::V4 {
        entries.extend_from_slice(V4_EXTRA);
    }
    if profile >= LibraryProfile::V5 {
        entries.extend_from_slice(V5_EXTRA);
    }
    entries
}

pub fn find_entry(profile: LibraryProfile, label: &str) -> Option<CatalogEntry> {
    let wanted = label.trim().to_lowercase();
    catalog(profile)
        .into_iter()
        .find(|e| e.label.to_lowercase() == wanted)
}
