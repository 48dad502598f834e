//! Parts and shapes shared by the unit tests.

use crate::ooxml::pptx::context::PartContext;
use crate::ooxml::pptx::parts::{MasterStyle, PartOwner};
use crate::ooxml::pptx::shapes::autoshape::AutoShape;
use crate::ooxml::pptx::shapes::base::{Placeholder, PlaceholderKind};
use crate::ooxml::pptx::shapes::tree::ShapeTree;
use std::rc::Rc;

pub(crate) const THEME_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">
  <a:themeElements>
    <a:clrScheme name="Office">
      <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
      <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
      <a:dk2><a:srgbClr val="44546A"/></a:dk2>
      <a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>
      <a:accent1><a:srgbClr val="4472C4"/></a:accent1>
      <a:accent2><a:srgbClr val="ED7D31"/></a:accent2>
      <a:accent3><a:srgbClr val="A5A5A5"/></a:accent3>
      <a:accent4><a:srgbClr val="FFC000"/></a:accent4>
      <a:accent5><a:srgbClr val="5B9BD5"/></a:accent5>
      <a:accent6><a:srgbClr val="70AD47"/></a:accent6>
      <a:hlink><a:srgbClr val="0563C1"/></a:hlink>
      <a:folHlink><a:srgbClr val="954F72"/></a:folHlink>
    </a:clrScheme>
    <a:fontScheme name="Office">
      <a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>
      <a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>
    </a:fontScheme>
    <a:fmtScheme name="Office">
      <a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst>
    </a:fmtScheme>
  </a:themeElements>
</a:theme>"#;

pub(crate) const MASTER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld>
    <p:spTree>
      <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
      <p:grpSpPr/>
      <p:sp>
        <p:nvSpPr><p:cNvPr id="2" name="Title Placeholder 1"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
        <p:spPr><a:xfrm><a:off x="838200" y="365125"/><a:ext cx="10515600" cy="1325563"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>
        <p:txBody>
          <a:bodyPr anchor="ctr"><a:normAutofit/></a:bodyPr>
          <a:lstStyle><a:lvl1pPr><a:defRPr sz="4400" b="0" i="0"><a:latin typeface="+mj-lt"/></a:defRPr></a:lvl1pPr></a:lstStyle>
          <a:p><a:r><a:rPr lang="en-US"/><a:t>Click to edit Master title style</a:t></a:r></a:p>
        </p:txBody>
      </p:sp>
      <p:sp>
        <p:nvSpPr><p:cNvPr id="3" name="Text Placeholder 2"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr>
        <p:spPr><a:xfrm><a:off x="838200" y="1825625"/><a:ext cx="10515600" cy="4351338"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>
        <p:txBody>
          <a:bodyPr><a:normAutofit/></a:bodyPr>
          <a:lstStyle>
            <a:lvl1pPr marL="228600"><a:defRPr sz="2800" b="0" i="0"><a:latin typeface="+mn-lt"/></a:defRPr></a:lvl1pPr>
            <a:lvl2pPr marL="685800"><a:defRPr sz="2400" b="1" i="0"><a:latin typeface="Georgia"/><a:ea typeface="MS Mincho"/></a:defRPr></a:lvl2pPr>
          </a:lstStyle>
          <a:p><a:pPr lvl="0"/><a:r><a:rPr lang="en-US"/><a:t>Edit Master text styles</a:t></a:r></a:p>
          <a:p><a:pPr lvl="1"/><a:r><a:rPr lang="en-US"/><a:t>Second level</a:t></a:r></a:p>
        </p:txBody>
      </p:sp>
    </p:spTree>
  </p:cSld>
  <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
  <p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>
</p:sldMaster>"#;

pub(crate) const LAYOUT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="obj">
  <p:cSld name="Title and Content">
    <p:spTree>
      <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
      <p:grpSpPr/>
      <p:sp>
        <p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
        <p:spPr/>
        <p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang="en-US"/><a:t>Click to edit Master title style</a:t></a:r></a:p></p:txBody>
      </p:sp>
      <p:sp>
        <p:nvSpPr><p:cNvPr id="3" name="Content Placeholder 2"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr>
        <p:spPr><a:xfrm><a:off x="476250" y="1428750"/><a:ext cx="5715000" cy="2857500"/></a:xfrm></p:spPr>
        <p:txBody>
          <a:bodyPr/>
          <a:lstStyle><a:lvl1pPr><a:defRPr sz="3200"/></a:lvl1pPr></a:lstStyle>
          <a:p><a:r><a:rPr lang="en-US"/><a:t>Edit Master text styles</a:t></a:r></a:p>
        </p:txBody>
      </p:sp>
    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#;

pub(crate) const SLIDE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld>
    <p:spTree>
      <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
      <p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>
      <p:sp>
        <p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="ctrTitle"/></p:nvPr></p:nvSpPr>
        <p:spPr/>
        <p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang="en-US" dirty="0"/><a:t>Welcome</a:t></a:r></a:p></p:txBody>
      </p:sp>
      <p:sp>
        <p:nvSpPr><p:cNvPr id="3" name="Content Placeholder 2"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr>
        <p:spPr/>
        <p:txBody>
          <a:bodyPr><a:spAutoFit/></a:bodyPr>
          <a:lstStyle/>
          <a:p><a:r><a:rPr lang="en-US" dirty="0"/><a:t>Agenda</a:t></a:r></a:p>
        </p:txBody>
      </p:sp>
      <p:grpSp>
        <p:nvGrpSpPr><p:cNvPr id="10" name="Group 9"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
        <p:grpSpPr><a:xfrm><a:off x="952500" y="4762500"/><a:ext cx="3810000" cy="952500"/><a:chOff x="952500" y="4762500"/><a:chExt cx="3810000" cy="952500"/></a:xfrm></p:grpSpPr>
        <p:sp>
          <p:nvSpPr><p:cNvPr id="11" name="Grouped Box"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>
          <p:spPr><a:xfrm><a:off x="952500" y="4762500"/><a:ext cx="1905000" cy="952500"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:solidFill><a:schemeClr val="accent2"/></a:solidFill></p:spPr>
        </p:sp>
        <p:cxnSp>
          <p:nvCxnSpPr><p:cNvPr id="12" name="Straight Connector 11"/><p:cNvCxnSpPr/><p:nvPr/></p:nvCxnSpPr>
          <p:spPr><a:xfrm><a:off x="2857500" y="5238750"/><a:ext cx="1905000" cy="0"/></a:xfrm><a:prstGeom prst="line"><a:avLst/></a:prstGeom></p:spPr>
        </p:cxnSp>
      </p:grpSp>
      <p:pic>
        <p:nvPicPr><p:cNvPr id="13" name="Picture 12"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>
        <p:blipFill><a:blip r:embed="rId2"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>
        <p:spPr><a:xfrm><a:off x="6096000" y="4762500"/><a:ext cx="1905000" cy="1428750"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>
      </p:pic>
      <p:graphicFrame>
        <p:nvGraphicFramePr><p:cNvPr id="14" name="Table 13"/><p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr/></p:nvGraphicFramePr>
        <p:xfrm><a:off x="952500" y="5715000"/><a:ext cx="3810000" cy="476250"/></p:xfrm>
        <a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl/></a:graphicData></a:graphic>
      </p:graphicFrame>
      <p:extLst><p:ext uri="{BB962C8B-B14F-4D97-AF65-F5344CB8AC3E}"/></p:extLst>
    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sld>"#;

/// 200 x 100 px box at (100, 100) filled with literal red.
pub(crate) const SOLID_SP: &str = r#"<p:sp><p:nvSpPr><p:cNvPr id="4" name="Rectangle 3"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>
    <p:spPr><a:xfrm><a:off x="952500" y="952500"/><a:ext cx="1905000" cy="952500"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
    <a:solidFill><a:srgbClr val="FF0000"/></a:solidFill></p:spPr></p:sp>"#;

pub(crate) const SCHEME_SP: &str = r#"<p:sp><p:nvSpPr><p:cNvPr id="5" name="Rectangle 4"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>
    <p:spPr><a:prstGeom prst="rect"/><a:solidFill><a:schemeClr val="tx2"><a:lumMod val="75000"/></a:schemeClr></a:solidFill></p:spPr></p:sp>"#;

pub(crate) const PICTURE_FILL_SP: &str = r#"<p:sp><p:nvSpPr><p:cNvPr id="6" name="Rectangle 5"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>
    <p:spPr><a:prstGeom prst="rect"/><a:blipFill><a:blip r:embed="rId7"/><a:stretch><a:fillRect/></a:stretch></a:blipFill><a:ln><a:noFill/></a:ln></p:spPr></p:sp>"#;

pub(crate) const BACKGROUND_SP: &str = r#"<p:sp useBgFill="1"><p:nvSpPr><p:cNvPr id="7" name="Rectangle 6"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>
    <p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="952500" cy="952500"/></a:xfrm><a:prstGeom prst="rect"/><a:ln w="12700"/></p:spPr></p:sp>"#;

pub(crate) const BODY_PLACEHOLDER_SP: &str = r#"<p:sp><p:nvSpPr><p:cNvPr id="8" name="Content Placeholder 7"/><p:cNvSpPr/><p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr>
    <p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang="en-US"/><a:t>Body</a:t></a:r></a:p></p:txBody></p:sp>"#;

/// 300 x 100 px box at (0, 200) whose body resizes to fit, 20pt runs.
pub(crate) const AUTOFIT_SP: &str = r#"<p:sp><p:nvSpPr><p:cNvPr id="9" name="TextBox 8"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>
    <p:spPr><a:xfrm><a:off x="0" y="1905000"/><a:ext cx="2857500" cy="952500"/></a:xfrm><a:prstGeom prst="rect"/><a:noFill/></p:spPr>
    <p:txBody><a:bodyPr wrap="square"><a:spAutoFit/></a:bodyPr><a:lstStyle/>
    <a:p><a:r><a:rPr lang="en-US" sz="2000"/><a:t>seed</a:t></a:r></a:p></p:txBody></p:sp>"#;

/// Same box as [`AUTOFIT_SP`] with wrapping turned off.
pub(crate) const NO_WRAP_SP: &str = r#"<p:sp><p:nvSpPr><p:cNvPr id="10" name="TextBox 9"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>
    <p:spPr><a:xfrm><a:off x="0" y="1905000"/><a:ext cx="2857500" cy="952500"/></a:xfrm><a:prstGeom prst="rect"/></p:spPr>
    <p:txBody><a:bodyPr wrap="none"><a:spAutoFit/></a:bodyPr><a:lstStyle/>
    <a:p><a:r><a:rPr lang="en-US" sz="2000"/><a:t>seed</a:t></a:r></a:p></p:txBody></p:sp>"#;

pub(crate) const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
pub(crate) const JPEG_BYTES: &[u8] = b"\xff\xd8\xff\xe0\0\x10JFIF";

pub(crate) fn master_style() -> Rc<MasterStyle> {
    Rc::new(MasterStyle::from_parts(MASTER_XML.as_bytes(), Some(THEME_XML.as_bytes())).unwrap())
}

pub(crate) fn slide_context() -> PartContext {
    PartContext::headless(PartOwner::Slide(master_style()))
}

pub(crate) fn master_context() -> PartContext {
    PartContext::headless(PartOwner::Master(master_style()))
}

/// Slide, layout and master trees with their placeholders linked.
pub(crate) struct LinkedTrees {
    pub slide: ShapeTree,
    pub layout: ShapeTree,
    pub master: ShapeTree,
}

fn body_of(tree: &ShapeTree) -> Rc<AutoShape> {
    tree.find_placeholder(&Placeholder::new(PlaceholderKind::Body, Some(1)))
        .unwrap()
}

impl LinkedTrees {
    pub fn slide_body(&self) -> Rc<AutoShape> {
        body_of(&self.slide)
    }

    pub fn layout_body(&self) -> Rc<AutoShape> {
        body_of(&self.layout)
    }

    pub fn master_body(&self) -> Rc<AutoShape> {
        body_of(&self.master)
    }

    pub fn master_title(&self) -> Rc<AutoShape> {
        self.master
            .find_placeholder(&Placeholder::new(PlaceholderKind::Title, None))
            .unwrap()
    }
}

pub(crate) fn linked_trees() -> LinkedTrees {
    let style = master_style();
    let context = |owner: PartOwner| PartContext::headless(owner);

    let master = ShapeTree::parse_part(MASTER_XML.as_bytes(), &context(PartOwner::Master(style.clone()))).unwrap();
    let layout = ShapeTree::parse_part(LAYOUT_XML.as_bytes(), &context(PartOwner::Layout(style.clone()))).unwrap();
    let slide = ShapeTree::parse_part(SLIDE_XML.as_bytes(), &context(PartOwner::Slide(style))).unwrap();

    assert_eq!(layout.link_placeholders(&master), 2);
    assert_eq!(slide.link_placeholders(&layout), 2);
    LinkedTrees { slide, layout, master }
}
