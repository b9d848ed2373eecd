//! DOM tag schema registry
//!
//! Default [`TagSchemaProvider`]: every known HTML, SVG and MathML element is
//! a markup tag, and hosts register definitions for their custom tags.

use super::element_schema_registry::{TagDefinition, TagSchemaProvider};
use crate::ast::Tag;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Known markup elements, one namespace per entry: `namespace|element,...`.
static ELEMENTS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "html|a,abbr,address,area,article,aside,audio,b,base,bdi,bdo,blockquote,body,br,button,canvas,caption,cite,code,col,colgroup,data,datalist,dd,del,details,dfn,dialog,dir,div,dl,dt,em,embed,fieldset,figcaption,figure,font,footer,form,frame,frameset,h1,h2,h3,h4,h5,h6,head,header,hgroup,hr,html,i,iframe,img,input,ins,kbd,label,legend,li,link,main,map,mark,marquee,menu,meta,meter,nav,noscript,object,ol,optgroup,option,output,p,param,picture,pre,progress,q,rb,rp,rt,rtc,ruby,s,samp,script,search,section,select,slot,small,source,span,strong,style,sub,summary,sup,table,tbody,td,template,textarea,tfoot,th,thead,time,title,tr,track,u,ul,var,video,wbr",
        "svg|svg,animate,animateMotion,animateTransform,circle,clipPath,defs,desc,ellipse,feBlend,feColorMatrix,feComponentTransfer,feComposite,feConvolveMatrix,feDiffuseLighting,feDisplacementMap,feDistantLight,feDropShadow,feFlood,feGaussianBlur,feImage,feMerge,feMergeNode,feMorphology,feOffset,fePointLight,feSpecularLighting,feSpotLight,feTile,feTurbulence,filter,foreignObject,g,image,line,linearGradient,marker,mask,metadata,mpath,path,pattern,polygon,polyline,radialGradient,rect,set,stop,switch,symbol,text,textPath,tspan,use,view",
        "math|math,maction,menclose,merror,mfenced,mfrac,mi,mmultiscripts,mn,mo,mover,mpadded,mphantom,mroot,mrow,ms,mspace,msqrt,mstyle,msub,msubsup,msup,mtable,mtd,mtext,mtr,munder,munderover,semantics",
    ]
});

pub struct TagSchemaRegistry {
    definitions: HashMap<String, TagDefinition>,
}

impl TagSchemaRegistry {
    pub fn new() -> Self {
        let mut definitions = HashMap::new();
        for encoded in ELEMENTS.iter() {
            let Some((_namespace, names)) = encoded.split_once('|') else {
                continue;
            };
            for name in names.split(',').filter(|name| !name.is_empty()) {
                definitions.insert(name.to_string(), TagDefinition::html(name));
            }
        }
        TagSchemaRegistry { definitions }
    }

    /// Register or replace the definition of a tag.
    pub fn register(&mut self, definition: TagDefinition) -> &mut Self {
        self.definitions.insert(definition.name.clone(), definition);
        self
    }

    pub fn with(mut self, definition: TagDefinition) -> Self {
        self.register(definition);
        self
    }

    pub fn get(&self, name: &str) -> Option<&TagDefinition> {
        self.definitions
            .get(name)
            .or_else(|| self.definitions.get(&name.to_ascii_lowercase()))
    }

    pub fn all_known_tag_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.definitions.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for TagSchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TagSchemaProvider for TagSchemaRegistry {
    fn tag_definition(&self, tag: &Tag) -> Option<&TagDefinition> {
        self.get(&tag.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry = TagSchemaRegistry::new();
        assert!(registry.get("div").is_some());
        assert!(registry.get("feGaussianBlur").is_some());
        assert!(registry.get("my-button").is_none());
    }

    #[test]
    fn test_native_tags() {
        let registry = TagSchemaRegistry::new();
        assert!(registry.is_native_tag(&Tag::new("div")));
        assert!(registry.is_native_tag(&Tag::new("DIV")));
        assert!(!registry.is_native_tag(&Tag::new("my-button")));
    }

    #[test]
    fn test_registered_custom_tag() {
        let registry =
            TagSchemaRegistry::new().with(TagDefinition::custom("my-button", ["label"]));
        let tag = Tag::new("my-button");
        assert!(!registry.is_native_tag(&tag));
        let def = registry.tag_definition(&tag).unwrap();
        assert!(def.has_attribute("label"));
    }

    #[test]
    fn test_all_known_tag_names_sorted() {
        let names = TagSchemaRegistry::new().all_known_tag_names();
        assert_eq!(names.first().map(String::as_str), Some("a"));
        assert!(names.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
